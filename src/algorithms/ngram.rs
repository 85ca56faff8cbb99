//! Gram tokenizer
//!
//! Turns a normalized string into overlapping fixed-length substrings
//! ("grams"). Before windowing, the string is filtered to a fixed
//! character class and wrapped in `-` sentinels, so word boundaries
//! produce their own grams:
//!
//! ```text
//! "Apple!" -> "apple" -> "-apple-" -> ["-ap", "app", "ppl", "ple", "le-"]   (size 3)
//! ```
//!
//! # Gram Size Limits
//!
//! Valid gram sizes are in the range 1-32 (inclusive).
//! - `gram_size = 0` yields no grams (invalid)
//! - `gram_size > 32` is clamped to 32

use ahash::AHashMap;
use smallvec::SmallVec;

/// Maximum valid gram size. Values above this are clamped.
pub const MAX_GRAM_SIZE: usize = 32;

/// Boundary and padding character
pub const SENTINEL: char = '-';

/// Gram -> number of occurrences in one string
pub type GramCounts = AHashMap<String, usize>;

#[inline]
fn validate_gram_size(gram_size: usize) -> usize {
    if gram_size == 0 {
        0
    } else {
        gram_size.min(MAX_GRAM_SIZE)
    }
}

/// Whether a character survives gram filtering.
///
/// Keeps ASCII letters and digits, the Latin-1 supplement block
/// (U+00C0..=U+00FF), comma and space.
#[inline]
#[must_use]
pub fn is_gram_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{C0}'..='\u{FF}').contains(&c) || c == ',' || c == ' '
}

/// Filter and wrap a value, right-padding with sentinels up to `gram_size`
fn padded_chars(value: &str, gram_size: usize) -> SmallVec<[char; 64]> {
    let mut chars: SmallVec<[char; 64]> = SmallVec::new();
    chars.push(SENTINEL);
    chars.extend(value.chars().filter(|&c| is_gram_char(c)));
    chars.push(SENTINEL);
    while chars.len() < gram_size {
        chars.push(SENTINEL);
    }
    chars
}

/// Extract every gram of `value`, left to right, sliding by one character.
///
/// `value` is expected to be normalized already. At least one gram is
/// produced for any valid `gram_size`, even for an empty value.
#[must_use]
pub fn extract_grams(value: &str, gram_size: usize) -> Vec<String> {
    let gram_size = validate_gram_size(gram_size);
    if gram_size == 0 {
        return vec![];
    }

    padded_chars(value, gram_size)
        .windows(gram_size)
        .map(|w| w.iter().collect())
        .collect()
}

/// Count gram occurrences. Repeated grams increment the same entry.
#[must_use]
pub fn gram_counts(value: &str, gram_size: usize) -> GramCounts {
    let mut counts = GramCounts::new();
    for gram in extract_grams(value, gram_size) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// Squared Euclidean norm of a gram-frequency vector, exact in integers
#[must_use]
pub fn sum_of_squares(counts: &GramCounts) -> usize {
    counts.values().map(|&c| c * c).sum()
}

/// Euclidean norm of a gram-frequency vector
#[must_use]
pub fn vector_norm(counts: &GramCounts) -> f64 {
    (sum_of_squares(counts) as f64).sqrt()
}

/// Tokenizer bound to a single gram size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GramTokenizer {
    /// Length of each gram
    pub gram_size: usize,
}

impl Default for GramTokenizer {
    fn default() -> Self {
        Self::new(2)
    }
}

impl GramTokenizer {
    #[must_use]
    pub fn new(gram_size: usize) -> Self {
        Self {
            gram_size: validate_gram_size(gram_size),
        }
    }

    /// Gram-frequency vector of a normalized string, with its squared norm
    #[must_use]
    pub fn vectorize(&self, value: &str) -> (GramCounts, usize) {
        let counts = gram_counts(value, self.gram_size);
        let sum_sq = sum_of_squares(&counts);
        (counts, sum_sq)
    }
}
