//! Fuzzy set: typo-tolerant lookup over a growing corpus of strings
//!
//! Every added string is lower-cased and indexed once per gram size in the
//! configured range. A query is scored against the largest gram size first;
//! the first size whose inverted index shares any gram with the query
//! decides the result:
//!
//! 1. cosine similarity between the query's and each entry's gram vectors
//! 2. optionally, the top [`RERANK_LIMIT`] candidates are re-scored with
//!    normalized Levenshtein similarity
//! 3. candidates below the minimum score are dropped
//!
//! ```
//! use fuzzyset::FuzzySet;
//!
//! let set: FuzzySet = ["apple", "app", "apply", "snapple"].into_iter().collect();
//! let matches = set.search("aple", None).unwrap();
//! assert_eq!(matches[0].value, "apple");
//! ```

use ahash::AHashMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use super::gram_index::GramTable;
use crate::algorithms::levenshtein::levenshtein_similarity;
use crate::algorithms::normalize::normalize;
use crate::config::{FallbackPolicy, FuzzySetConfig, RERANK_LIMIT};
use crate::error::Result;

/// One ranked search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatch {
    /// Similarity in [0.0, 1.0]: cosine, or Levenshtein when re-ranking is on
    pub score: f64,
    /// The originally added string
    pub value: String,
    /// Gram size that produced this result
    pub gram_size: usize,
}

/// Outcome of [`FuzzySet::get`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GetResult {
    Matches(Vec<FuzzyMatch>),
    /// Caller-supplied fallback, returned when no gram size had candidates
    Default(String),
}

/// In-memory fuzzy string set
#[derive(Debug, Clone)]
pub struct FuzzySet {
    config: FuzzySetConfig,
    /// Normalized string -> first original added for it
    exact_set: AHashMap<String, String>,
    /// One table per gram size, ascending from `gram_size_lower`
    tables: Vec<GramTable>,
}

impl FuzzySet {
    /// Create a set from seed strings, added in order.
    ///
    /// Later seeds that normalize to an already added string are dropped.
    pub fn new<I, S>(seeds: I, config: FuzzySetConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;
        let mut set = Self::build(config);
        set.add_all(seeds);
        debug!(
            gram_size_lower = config.gram_size_lower,
            gram_size_upper = config.gram_size_upper,
            use_levenshtein = config.use_levenshtein,
            entries = set.len(),
            "built fuzzy set"
        );
        Ok(set)
    }

    /// Create an empty set
    pub fn with_config(config: FuzzySetConfig) -> Result<Self> {
        Self::new(std::iter::empty::<String>(), config)
    }

    /// Assumes `config` is valid
    fn build(config: FuzzySetConfig) -> Self {
        Self {
            config,
            exact_set: AHashMap::new(),
            tables: (config.gram_size_lower..=config.gram_size_upper)
                .map(GramTable::new)
                .collect(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &FuzzySetConfig {
        &self.config
    }

    /// Table for one gram size, if that size is indexed
    #[must_use]
    pub fn table(&self, gram_size: usize) -> Option<&GramTable> {
        gram_size
            .checked_sub(self.config.gram_size_lower)
            .and_then(|i| self.tables.get(i))
    }

    /// Add a string. Returns `false` if its normalized form is already present;
    /// the original stored for that form is never replaced.
    pub fn add(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        let normalized = normalize(&value);
        if self.exact_set.contains_key(&normalized) {
            trace!(%normalized, "skipping duplicate");
            return false;
        }

        for table in &mut self.tables {
            let id = table.insert(&normalized);
            trace!(%normalized, gram_size = table.gram_size(), id, "indexed");
        }
        self.exact_set.insert(normalized, value);
        true
    }

    /// Add multiple strings in order. Returns how many were new.
    pub fn add_all<I, S>(&mut self, iter: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for value in iter {
            if self.add(value) {
                added += 1;
            }
        }
        added
    }

    /// Rank indexed strings by similarity to `query`.
    ///
    /// `min_match_score` defaults to the configured threshold (0.33 unless
    /// changed). Returns `None` when no gram size shares a single gram with
    /// the query. A `Some` with an empty list means candidates were found
    /// but all scored below the threshold (see [`FallbackPolicy`]).
    #[must_use]
    pub fn search(&self, query: &str, min_match_score: Option<f64>) -> Option<Vec<FuzzyMatch>> {
        let min_match_score = min_match_score.unwrap_or(self.config.min_match_score);
        let normalized = normalize(query);

        for table in self.config.gram_sizes_descending().filter_map(|size| self.table(size)) {
            let Some(results) = self.search_table(table, &normalized, min_match_score) else {
                trace!(gram_size = table.gram_size(), "no shared grams");
                continue;
            };
            if results.is_empty() && self.config.fallback == FallbackPolicy::ContinueWhenFiltered {
                continue;
            }
            return Some(results);
        }

        None
    }

    /// Score against a single table. `None` if nothing shares a gram.
    fn search_table(
        &self,
        table: &GramTable,
        normalized: &str,
        min_match_score: f64,
    ) -> Option<Vec<FuzzyMatch>> {
        let candidates = table.candidates(normalized);
        if candidates.is_empty() {
            return None;
        }
        let found = candidates.len();

        let mut scored: Vec<(f64, &str)> = candidates
            .iter()
            .filter_map(|c| table.get(c.entry).map(|e| (c.score, e.normalized.as_str())))
            .collect();

        if self.config.use_levenshtein {
            scored.truncate(RERANK_LIMIT);
            for (score, text) in &mut scored {
                *score = levenshtein_similarity(normalized, *text);
            }
            scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        }

        let gram_size = table.gram_size();
        let results: Vec<FuzzyMatch> = scored
            .into_iter()
            .filter(|&(score, _)| score >= min_match_score)
            .filter_map(|(score, text)| {
                self.exact_set.get(text).map(|original| FuzzyMatch {
                    score,
                    value: original.clone(),
                    gram_size,
                })
            })
            .collect();

        debug!(
            gram_size,
            candidates = found,
            kept = results.len(),
            min_match_score,
            "scored query"
        );
        Some(results)
    }

    /// [`search`](Self::search), substituting `default_value` when there is no result
    #[must_use]
    pub fn get(
        &self,
        value: &str,
        default_value: Option<&str>,
        min_match_score: Option<f64>,
    ) -> Option<GetResult> {
        match self.search(value, min_match_score) {
            Some(matches) => Some(GetResult::Matches(matches)),
            None => default_value.map(|d| GetResult::Default(d.to_string())),
        }
    }

    /// Search many queries in parallel. Output order follows `queries`.
    #[must_use]
    pub fn batch_search<Q>(&self, queries: &[Q], min_match_score: Option<f64>) -> Vec<Option<Vec<FuzzyMatch>>>
    where
        Q: AsRef<str> + Sync,
    {
        queries
            .par_iter()
            .map(|q| self.search(q.as_ref(), min_match_score))
            .collect()
    }

    /// Whether a string with the same normalized form was added
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.exact_set.contains_key(&normalize(value))
    }

    /// Number of distinct normalized entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.exact_set.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact_set.is_empty()
    }

    /// Originally added strings, one per normalized form, in insertion order
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        self.tables
            .first()
            .map(|table| {
                table
                    .entries()
                    .iter()
                    .filter_map(|e| self.exact_set.get(&e.normalized).map(String::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for FuzzySet {
    fn default() -> Self {
        Self::build(FuzzySetConfig::default())
    }
}

impl<S: Into<String>> Extend<S> for FuzzySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<S: Into<String>> FromIterator<S> for FuzzySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::default();
        set.add_all(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FuzzySetError;

    fn fruit() -> FuzzySet {
        ["apple", "app", "apply", "snapple"].into_iter().collect()
    }

    #[test]
    fn test_add_dedups_on_normalized_form() {
        let mut set = FuzzySet::default();
        assert!(set.add("Hello"));
        assert!(!set.add("hello"));
        assert!(!set.add("HELLO"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.values(), vec!["Hello"]);
        for size in 2..=3 {
            assert_eq!(set.table(size).map(GramTable::len), Some(1));
        }
    }

    #[test]
    fn test_seeds_first_wins() {
        let set = FuzzySet::new(["Foo", "foo", "bar"], FuzzySetConfig::default()).unwrap();
        assert_eq!(set.values(), vec!["Foo", "bar"]);
    }

    #[test]
    fn test_invalid_config() {
        let err = FuzzySet::with_config(FuzzySetConfig::new().with_gram_sizes(3, 2)).unwrap_err();
        assert_eq!(err, FuzzySetError::InvalidGramRange { lower: 3, upper: 2 });
    }

    #[test]
    fn test_table_lookup() {
        let set = FuzzySet::default();
        assert!(set.table(1).is_none());
        assert_eq!(set.table(2).map(GramTable::gram_size), Some(2));
        assert_eq!(set.table(3).map(GramTable::gram_size), Some(3));
        assert!(set.table(4).is_none());
    }

    #[test]
    fn test_search_ranks_with_levenshtein() {
        let matches = fruit().search("aple", None).unwrap();
        let values: Vec<&str> = matches.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["apple", "apply", "snapple", "app"]);
        assert!((matches[0].score - 0.8).abs() < 1e-12);
        assert!(matches.iter().all(|m| m.gram_size == 3));
    }

    #[test]
    fn test_search_cosine_only() {
        let set = FuzzySet::new(
            ["apple", "app", "apply", "snapple"],
            FuzzySetConfig::new().with_levenshtein(false),
        )
        .unwrap();
        let matches = set.search("aple", None).unwrap();
        assert_eq!(matches[0].value, "apple");
        // 3 shared grams of 4 and 5
        assert!((matches[0].score - 3.0 / (2.0 * 5f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_returns_original_casing() {
        let set = FuzzySet::new(["New York"], FuzzySetConfig::default()).unwrap();
        let matches = set.search("new yrok", None).unwrap();
        assert_eq!(matches[0].value, "New York");
    }

    #[test]
    fn test_no_shared_grams_is_none() {
        assert!(fruit().search("zzzzz", Some(0.9)).is_none());
        assert!(FuzzySet::default().search("anything", Some(0.0)).is_none());
    }

    #[test]
    fn test_filtered_result_stops_fallback() {
        // "-ab" is shared at size 3, so size 3 decides even though
        // the Levenshtein score (1/3) is filtered out.
        let set = FuzzySet::new(["abcdef"], FuzzySetConfig::default()).unwrap();
        let matches = set.search("abzzzz", Some(0.99)).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_continue_when_filtered() {
        let config = FuzzySetConfig::new().with_fallback(FallbackPolicy::ContinueWhenFiltered);
        let set = FuzzySet::new(["abcdef"], config).unwrap();
        assert!(set.search("abzzzz", Some(0.99)).is_none());
        assert!(set.search("abcdef", Some(0.99)).is_some());
    }

    #[test]
    fn test_get_default() {
        let set = fruit();
        assert_eq!(
            set.get("zzzzz", Some("none"), Some(0.9)),
            Some(GetResult::Default("none".to_string()))
        );
        assert_eq!(set.get("zzzzz", None, Some(0.9)), None);
        assert!(matches!(
            set.get("apple", Some("none"), None),
            Some(GetResult::Matches(m)) if m[0].value == "apple"
        ));
    }

    #[test]
    fn test_batch_search_preserves_order() {
        let set = fruit();
        let results = set.batch_search(&["apply", "zzzzz", "snaple"], None);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap()[0].value, "apply");
        assert!(results[1].is_none());
        assert_eq!(results[2].as_ref().unwrap()[0].value, "snapple");
    }

    #[test]
    fn test_contains_and_extend() {
        let mut set = fruit();
        assert!(set.contains("APPLE"));
        assert!(!set.contains("pear"));
        set.extend(["pear", "Pear"]);
        assert_eq!(set.len(), 5);
        assert!(set.contains("pear"));
    }

    #[test]
    fn test_empty_string_entry() {
        let mut set = FuzzySet::default();
        assert!(set.add(""));
        let matches = set.search("", None).unwrap();
        assert_eq!(matches[0].value, "");
        assert_eq!(matches[0].score, 1.0);
    }
}
