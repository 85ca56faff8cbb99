//! Error types for fuzzy set construction and checked comparisons.
//!
//! Only programmer errors are modeled here. An empty index, a query with no
//! shared grams, or results below the score threshold are ordinary values.

use thiserror::Error;

/// Errors raised by `fuzzyset`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzySetError {
    /// Gram range is empty, starts at zero, or exceeds the supported maximum
    #[error("Invalid gram size range: lower={lower}, upper={upper} (need 1 <= lower <= upper <= {max})", max = crate::algorithms::ngram::MAX_GRAM_SIZE)]
    InvalidGramRange { lower: usize, upper: usize },

    /// Default minimum match score is NaN, infinite, or outside [0.0, 1.0]
    #[error("min_match_score must be a finite number in range [0.0, 1.0], got {0}")]
    InvalidMinScore(f64),

    /// A value that must be a string was absent
    #[error("Must use a string as argument to fuzzy set functions: {0}")]
    InvalidInput(String),

    /// Similarity was requested between two absent values
    #[error("Trying to compare two null values")]
    NullComparison,
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, FuzzySetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FuzzySetError::InvalidGramRange { lower: 3, upper: 2 };
        assert!(err.to_string().contains("lower=3"));
        assert!(err.to_string().contains("upper=2"));

        assert_eq!(
            FuzzySetError::NullComparison.to_string(),
            "Trying to compare two null values"
        );
    }
}
