//! Thread-safe wrapper for a fuzzy set.
//!
//! [`FuzzySet`] itself has no internal locking: `add` needs `&mut self` and
//! `search` needs `&self`. This wrapper puts it behind a
//! `parking_lot::RwLock` so it can be shared across threads.
//!
//! # Usage
//!
//! ```
//! use fuzzyset::ThreadSafeFuzzySet;
//!
//! let set = ThreadSafeFuzzySet::new();
//!
//! let writer = set.clone();
//! std::thread::spawn(move || {
//!     writer.add("hello");
//! })
//! .join()
//! .unwrap();
//!
//! assert!(set.contains("HELLO"));
//! ```
//!
//! # Performance Notes
//!
//! - Read operations (search, get, contains, values) acquire a shared read lock
//! - Write operations (add, add_all) acquire an exclusive write lock
//! - Multiple readers can proceed concurrently
//! - Writers block all other access

use parking_lot::RwLock;
use std::sync::Arc;

use super::fuzzy_set::{FuzzyMatch, FuzzySet, GetResult};
use crate::config::FuzzySetConfig;
use crate::error::Result;

/// Thread-safe wrapper for FuzzySet.
///
/// Provides concurrent read access with exclusive write access using RwLock.
#[derive(Clone, Default)]
pub struct ThreadSafeFuzzySet {
    inner: Arc<RwLock<FuzzySet>>,
}

impl ThreadSafeFuzzySet {
    /// Create an empty set with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with a custom configuration.
    pub fn with_config(config: FuzzySetConfig) -> Result<Self> {
        FuzzySet::with_config(config).map(Self::from_set)
    }

    /// Wrap an existing FuzzySet.
    pub fn from_set(set: FuzzySet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(set)),
        }
    }

    /// Add a string.
    ///
    /// Acquires an exclusive write lock.
    pub fn add(&self, value: impl Into<String>) -> bool {
        self.inner.write().add(value)
    }

    /// Add multiple strings.
    ///
    /// Acquires an exclusive write lock for the entire operation.
    pub fn add_all<I, S>(&self, iter: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.write().add_all(iter)
    }

    /// Rank indexed strings by similarity to `query`.
    ///
    /// Acquires a shared read lock.
    pub fn search(&self, query: &str, min_match_score: Option<f64>) -> Option<Vec<FuzzyMatch>> {
        self.inner.read().search(query, min_match_score)
    }

    /// Search with a fallback value.
    ///
    /// Acquires a shared read lock.
    pub fn get(
        &self,
        value: &str,
        default_value: Option<&str>,
        min_match_score: Option<f64>,
    ) -> Option<GetResult> {
        self.inner.read().get(value, default_value, min_match_score)
    }

    /// Check if a string with the same normalized form was added.
    ///
    /// Acquires a shared read lock.
    pub fn contains(&self, value: &str) -> bool {
        self.inner.read().contains(value)
    }

    /// Originally added strings, cloned out of the lock.
    ///
    /// Acquires a shared read lock.
    pub fn values(&self) -> Vec<String> {
        self.inner
            .read()
            .values()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Acquires a shared read lock.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Acquires a shared read lock.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Get direct access to the underlying set.
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, FuzzySet> {
        self.inner.read()
    }

    /// Get exclusive access to the underlying set.
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, FuzzySet> {
        self.inner.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_reads() {
        let set = ThreadSafeFuzzySet::new();
        set.add_all(["hello", "hallo", "hullo", "world"]);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let set = set.clone();
                thread::spawn(move || {
                    let results = set.search("helo", None).unwrap();
                    assert_eq!(results[0].value, "hello");
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_concurrent_writes() {
        let set = ThreadSafeFuzzySet::new();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let set = set.clone();
                thread::spawn(move || {
                    for j in 0..100 {
                        set.add(format!("item_{}_{}", i, j));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(set.len(), 400);
        let guard = set.read();
        for size in 2..=3 {
            assert_eq!(guard.table(size).map(|t| t.len()), Some(400));
        }
    }

    #[test]
    fn test_mixed_read_write() {
        let set = ThreadSafeFuzzySet::new();
        set.add("initial");

        let set1 = set.clone();
        let writer = thread::spawn(move || {
            for i in 0..50 {
                set1.add(format!("write_{}", i));
                thread::yield_now();
            }
        });

        let set2 = set.clone();
        let reader = thread::spawn(move || {
            for _ in 0..100 {
                assert!(set2.search("initial", None).is_some());
                thread::yield_now();
            }
        });

        writer.join().unwrap();
        reader.join().unwrap();

        assert_eq!(set.len(), 51);
        assert_eq!(set.values()[0], "initial");
    }
}
