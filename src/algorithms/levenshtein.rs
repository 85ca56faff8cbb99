//! Levenshtein (edit) distance implementation
//!
//! Classic insert/delete/substitute distance over Unicode scalar values,
//! computed with a single rolling DP row sized to the shorter input.

use super::{normalized_similarity, EditDistance};
use crate::error::{FuzzySetError, Result};
use smallvec::SmallVec;

/// Rolling-row DP distance over char slices
#[inline]
fn dp_distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Ensure shorter string is on the column axis
    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;

        for (j, &tc) in target.iter().enumerate() {
            let cost = usize::from(sc != tc);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[n_target]
}

/// Levenshtein distance calculator
///
/// # Complexity
/// - Time: O(m*n) where m and n are string lengths
/// - Space: O(min(m,n)) using single-row DP optimization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        levenshtein(a, b)
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Edit distance between two strings
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    dp_distance(&a_chars, &b_chars)
}

/// Normalized similarity (0.0 to 1.0): `1 - distance / max(len(a), len(b))`.
///
/// Lengths are counted in chars. Two empty strings have similarity 1.0.
#[inline]
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    let dist = dp_distance(&a_chars, &b_chars);
    normalized_similarity(dist, a_chars.len().max(b_chars.len()))
}

/// Similarity between two values that may be absent.
///
/// - both absent: [`FuzzySetError::NullComparison`]
/// - one absent: `0.0`
/// - otherwise: [`levenshtein_similarity`]
///
/// # Example
/// ```
/// use fuzzyset::algorithms::levenshtein::similarity_checked;
///
/// assert_eq!(similarity_checked(Some("abc"), None), Ok(0.0));
/// assert!(similarity_checked(None, None).is_err());
/// ```
pub fn similarity_checked(a: Option<&str>, b: Option<&str>) -> Result<f64> {
    match (a, b) {
        (None, None) => Err(FuzzySetError::NullComparison),
        (Some(a), Some(b)) => Ok(levenshtein_similarity(a, b)),
        _ => Ok(0.0),
    }
}
