//! Fuzzy set configuration
//!
//! All parameters are fixed when a [`FuzzySet`](crate::FuzzySet) is built.

use serde::{Deserialize, Serialize};

use crate::algorithms::ngram::MAX_GRAM_SIZE;
use crate::error::{FuzzySetError, Result};

/// Default minimum score a match needs to be returned
pub const DEFAULT_MIN_MATCH_SCORE: f64 = 0.33;

/// Number of top cosine candidates re-scored with Levenshtein similarity
pub const RERANK_LIMIT: usize = 50;

/// What to do when a gram size finds candidates but none pass the score filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Return the (empty) filtered list from the first gram size that had candidates
    #[default]
    StopAtFirstCandidates,
    /// Try the next smaller gram size when filtering leaves nothing
    ContinueWhenFiltered,
}

/// Configuration for a [`FuzzySet`](crate::FuzzySet)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzySetConfig {
    /// Re-rank the top cosine candidates by Levenshtein similarity
    pub use_levenshtein: bool,
    /// Smallest gram size indexed (inclusive)
    pub gram_size_lower: usize,
    /// Largest gram size indexed (inclusive)
    pub gram_size_upper: usize,
    /// Threshold used when a search does not supply one
    pub min_match_score: f64,
    /// Behavior when the deciding gram size has candidates but none pass the threshold
    pub fallback: FallbackPolicy,
}

impl Default for FuzzySetConfig {
    fn default() -> Self {
        Self {
            use_levenshtein: true,
            gram_size_lower: 2,
            gram_size_upper: 3,
            min_match_score: DEFAULT_MIN_MATCH_SCORE,
            fallback: FallbackPolicy::default(),
        }
    }
}

impl FuzzySetConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_levenshtein(mut self, use_levenshtein: bool) -> Self {
        self.use_levenshtein = use_levenshtein;
        self
    }

    #[must_use]
    pub fn with_gram_sizes(mut self, lower: usize, upper: usize) -> Self {
        self.gram_size_lower = lower;
        self.gram_size_upper = upper;
        self
    }

    #[must_use]
    pub fn with_min_match_score(mut self, min_match_score: f64) -> Self {
        self.min_match_score = min_match_score;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Gram sizes from largest to smallest, the order searches visit them
    pub fn gram_sizes_descending(&self) -> impl Iterator<Item = usize> {
        (self.gram_size_lower..=self.gram_size_upper).rev()
    }

    /// Check that the gram range and default threshold are usable
    pub fn validate(&self) -> Result<()> {
        let (lower, upper) = (self.gram_size_lower, self.gram_size_upper);
        if lower == 0 || lower > upper || upper > MAX_GRAM_SIZE {
            return Err(FuzzySetError::InvalidGramRange { lower, upper });
        }
        if !self.min_match_score.is_finite() || !(0.0..=1.0).contains(&self.min_match_score) {
            return Err(FuzzySetError::InvalidMinScore(self.min_match_score));
        }
        Ok(())
    }
}
