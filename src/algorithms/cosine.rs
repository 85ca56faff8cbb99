//! Cosine similarity over gram-frequency vectors
//!
//! The fuzzy set computes dot products incrementally from its inverted
//! index and divides by the cached squared norms. The standalone functions here compute
//! the same score directly from two strings, which is useful for ad-hoc
//! comparisons and for checking index results.
//!
//! # Complexity
//! - Time: O(m+n) for building frequency maps and computing similarity
//! - Space: O(unique_grams) for frequency maps

use super::ngram::{gram_counts, sum_of_squares, GramCounts};
use super::normalize::normalize;
use super::Similarity;

/// Cosine of the angle between two integer vectors, given their dot product
/// and squared norms.
///
/// Taking a single square root of the product of squared norms keeps
/// identical vectors at exactly 1.0 (`s / sqrt(s * s) == 1.0`). Returns 0.0
/// when either vector is zero.
#[inline]
#[must_use]
pub fn cosine_score(dot_product: usize, sum_sq_a: usize, sum_sq_b: usize) -> f64 {
    let magnitude = (sum_sq_a as f64 * sum_sq_b as f64).sqrt();
    if magnitude == 0.0 {
        0.0
    } else {
        (dot_product as f64 / magnitude).min(1.0)
    }
}

/// Dot product of two gram-frequency vectors
#[must_use]
pub fn dot_product(a: &GramCounts, b: &GramCounts) -> usize {
    // Iterate the smaller map
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(gram, &count)| large.get(gram).map(|&other| count * other))
        .sum()
}

/// Calculate cosine similarity between two frequency maps.
fn cosine_from_maps(map_a: &GramCounts, map_b: &GramCounts) -> f64 {
    if map_a.is_empty() && map_b.is_empty() {
        return 1.0;
    }

    if map_a.is_empty() || map_b.is_empty() {
        return 0.0;
    }

    cosine_score(
        dot_product(map_a, map_b),
        sum_of_squares(map_a),
        sum_of_squares(map_b),
    )
}

/// Gram cosine similarity of two strings at one gram size.
///
/// Both strings are normalized first. Returns 0.0 if `gram_size` is 0.
#[must_use]
pub fn gram_cosine_similarity(a: &str, b: &str, gram_size: usize) -> f64 {
    if gram_size == 0 {
        return 0.0;
    }

    let a = normalize(a);
    let b = normalize(b);
    if a == b {
        return 1.0;
    }

    cosine_from_maps(&gram_counts(&a, gram_size), &gram_counts(&b, gram_size))
}

/// Gram cosine similarity calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GramCosine {
    /// Gram size used to vectorize both strings
    pub gram_size: usize,
}

impl Default for GramCosine {
    fn default() -> Self {
        Self::new(3)
    }
}

impl GramCosine {
    #[must_use]
    pub fn new(gram_size: usize) -> Self {
        Self { gram_size }
    }
}

impl Similarity for GramCosine {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        gram_cosine_similarity(a, b, self.gram_size)
    }

    fn name(&self) -> &'static str {
        "gram_cosine"
    }
}
