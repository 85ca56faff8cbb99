//! fuzzyset - Typo-tolerant string lookup
//!
//! Finds the entries of an in-memory corpus most similar to a query,
//! ranked by a score in [0.0, 1.0].
//!
//! # How matching works
//! - Strings are lower-cased and split into overlapping grams
//!   (sizes 2 and 3 by default), each size indexed separately
//! - Queries are scored by cosine similarity of gram-frequency vectors,
//!   trying the largest gram size first and falling back to smaller ones
//! - The best candidates are optionally re-scored by normalized
//!   Levenshtein similarity
//!
//! ```
//! use fuzzyset::{FuzzySet, FuzzySetConfig};
//!
//! let mut set = FuzzySet::new(["Mississippi", "Missouri"], FuzzySetConfig::default())?;
//! assert!(set.add("Minnesota"));
//! assert!(!set.add("MINNESOTA"));
//!
//! let best = &set.search("misisipi", None).unwrap()[0];
//! assert_eq!(best.value, "Mississippi");
//! # Ok::<(), fuzzyset::FuzzySetError>(())
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod indexing;

pub use algorithms::{EditDistance, Similarity};
pub use config::{FallbackPolicy, FuzzySetConfig, DEFAULT_MIN_MATCH_SCORE, RERANK_LIMIT};
pub use error::{FuzzySetError, Result};
pub use indexing::{FuzzyMatch, FuzzySet, GetResult, GramTable, ThreadSafeFuzzySet};
