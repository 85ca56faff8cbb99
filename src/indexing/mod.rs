//! Indexing structures for fuzzy lookup
//!
//! - Gram tables: per-gram-size entry store and inverted index
//! - Fuzzy set: multi-size matcher with Levenshtein re-ranking
//! - Thread-safe wrapper: reader/writer access to a shared fuzzy set

pub mod fuzzy_set;
pub mod gram_index;
pub mod threadsafe;

pub use fuzzy_set::*;
pub use gram_index::*;
pub use threadsafe::*;
