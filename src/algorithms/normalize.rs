//! String normalization
//!
//! Normalized strings are the lookup and deduplication key of a fuzzy set.
//! Normalization is case folding only: no trimming, no Unicode
//! decomposition, no punctuation removal (the gram tokenizer filters
//! characters separately).

use crate::error::{FuzzySetError, Result};

/// Lower-case a string for use as an index key
#[inline]
#[must_use]
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
}

/// Normalize a value that may be absent.
///
/// Callers holding an optional value (e.g. a nullable column) use this to
/// surface a missing value as [`FuzzySetError::InvalidInput`] instead of
/// silently indexing an empty string.
pub fn normalize_checked(s: Option<&str>) -> Result<String> {
    s.map(normalize)
        .ok_or_else(|| FuzzySetError::InvalidInput("expected a string, got nothing".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase() {
        assert_eq!(normalize("Hello World"), "hello world");
        assert_eq!(normalize("ÀÉÎ"), "àéî");
    }

    #[test]
    fn test_no_trimming() {
        assert_eq!(normalize("  Hello, World!  "), "  hello, world!  ");
    }

    #[test]
    fn test_checked() {
        assert_eq!(normalize_checked(Some("ABC")), Ok("abc".to_string()));
        assert!(matches!(
            normalize_checked(None),
            Err(FuzzySetError::InvalidInput(_))
        ));
    }
}
