//! Per-gram-size entry store and inverted index
//!
//! A [`GramTable`] owns everything indexed at one gram size:
//! - the entry store: `(vector norm, normalized string)` per entry, addressed
//!   by insertion position
//! - the inverted index: gram -> `(entry, occurrences)` postings
//!
//! Keeping one table per gram size means grams of different lengths can
//! never collide. Entries are append-only; an entry id is the 0-based
//! insertion position and stays valid for the lifetime of the table.

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::algorithms::cosine::cosine_score;
use crate::algorithms::ngram::{GramCounts, GramTokenizer};

/// One posting in the inverted index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Entry id within the owning table
    pub entry: usize,
    /// Occurrences of the gram in that entry
    pub count: usize,
}

/// Entry in the store
#[derive(Debug, Clone, PartialEq)]
pub struct GramEntry {
    /// Euclidean norm of the entry's gram-frequency vector
    pub norm: f64,
    /// Squared norm, kept exact for scoring
    pub sum_of_squares: usize,
    pub normalized: String,
}

/// Cosine-scored candidate from one table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entry: usize,
    pub score: f64,
}

/// Entry store plus inverted index for a single gram size
#[derive(Debug, Clone)]
pub struct GramTable {
    tokenizer: GramTokenizer,
    entries: Vec<GramEntry>,
    postings: AHashMap<String, Vec<Posting>>,
}

impl GramTable {
    /// Create an empty table for `gram_size`
    #[must_use]
    pub fn new(gram_size: usize) -> Self {
        Self {
            tokenizer: GramTokenizer::new(gram_size),
            entries: Vec::new(),
            postings: AHashMap::new(),
        }
    }

    #[must_use]
    pub fn gram_size(&self) -> usize {
        self.tokenizer.gram_size
    }

    /// Index a normalized string, returning its entry id.
    ///
    /// No deduplication happens here; the owning set decides what gets in.
    pub fn insert(&mut self, normalized: &str) -> usize {
        let id = self.entries.len();
        let (counts, sum_of_squares) = self.tokenizer.vectorize(normalized);

        for (gram, count) in counts {
            self.postings
                .entry(gram)
                .or_insert_with(Vec::new)
                .push(Posting { entry: id, count });
        }

        self.entries.push(GramEntry {
            norm: (sum_of_squares as f64).sqrt(),
            sum_of_squares,
            normalized: normalized.to_string(),
        });
        id
    }

    /// Accumulate the dot product between a query vector and every entry
    /// sharing at least one gram with it. Keys are in entry-id order.
    #[must_use]
    pub fn dot_products(&self, query_counts: &GramCounts) -> BTreeMap<usize, usize> {
        let mut matches = BTreeMap::new();
        for (gram, &count) in query_counts {
            if let Some(postings) = self.postings.get(gram) {
                for posting in postings {
                    *matches.entry(posting.entry).or_insert(0) += count * posting.count;
                }
            }
        }
        matches
    }

    /// Cosine-score every entry sharing a gram with `normalized_query`.
    ///
    /// Results are sorted by descending score; ties keep entry-id order.
    /// An empty result means no gram of the query occurs at this size.
    #[must_use]
    pub fn candidates(&self, normalized_query: &str) -> Vec<Candidate> {
        let (query_counts, query_sum_sq) = self.tokenizer.vectorize(normalized_query);

        let mut candidates: Vec<Candidate> = self
            .dot_products(&query_counts)
            .into_iter()
            .filter(|&(_, dot)| dot > 0)
            .filter_map(|(entry, dot)| {
                self.entries.get(entry).map(|e| Candidate {
                    entry,
                    score: cosine_score(dot, query_sum_sq, e.sum_of_squares),
                })
            })
            .collect();

        #[cfg(debug_assertions)]
        for c in &candidates {
            debug_assert!(!c.score.is_nan(), "NaN cosine score for entry {}", c.entry);
        }
        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        candidates
    }

    /// Get entry by id
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&GramEntry> {
        self.entries.get(id)
    }

    /// All entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[GramEntry] {
        &self.entries
    }

    /// Postings recorded for a gram
    #[must_use]
    pub fn postings(&self, gram: &str) -> Option<&[Posting]> {
        self.postings.get(gram).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
