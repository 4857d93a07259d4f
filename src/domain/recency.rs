//! Bounded, deduplicated list of recent search queries.
//!
//! The cache is the in-memory half of the recent-search feature: it enforces
//! ordering and capacity. Durability lives behind
//! [`RecencyStore`](crate::storage::RecencyStore) on the worker thread; the
//! application posts the full list to the worker after every change.

use serde::{Deserialize, Serialize};

/// Maximum number of queries kept.
pub const RECENCY_CAPACITY: usize = 5;

/// Most-recent-first list of at most [`RECENCY_CAPACITY`] distinct queries.
///
/// # Example
///
/// ```
/// use foodquest::domain::RecencyCache;
///
/// let mut cache = RecencyCache::default();
/// cache.record("sushi");
/// cache.record("tacos");
/// cache.record("sushi");
/// assert_eq!(cache.entries(), ["sushi", "tacos"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RecencyCache {
    entries: Vec<String>,
}

impl RecencyCache {
    /// Builds a cache from a stored list, restoring the invariants (no
    /// duplicates, at most five entries) if the stored data violates them.
    #[must_use]
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut cache = Self::default();
        for entry in entries {
            if cache.entries.len() == RECENCY_CAPACITY {
                break;
            }
            if !cache.entries.contains(&entry) {
                cache.entries.push(entry);
            }
        }
        cache
    }

    /// Moves `query` to the front, dropping any earlier copy and the oldest
    /// entry beyond capacity.
    pub fn record(&mut self, query: &str) {
        self.entries.retain(|existing| existing != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(RECENCY_CAPACITY);
    }

    /// Merges a list loaded from storage behind the entries recorded so far.
    ///
    /// Queries recorded during this session stay in front because they are
    /// more recent than anything persisted earlier.
    pub fn merge_loaded(&mut self, loaded: Vec<String>) {
        let mut merged = std::mem::take(&mut self.entries);
        merged.extend(loaded);
        *self = Self::from_entries(merged);
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl From<Vec<String>> for RecencyCache {
    fn from(entries: Vec<String>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<RecencyCache> for Vec<String> {
    fn from(cache: RecencyCache) -> Self {
        cache.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_twice_keeps_one_copy_at_front() {
        let mut cache = RecencyCache::default();
        cache.record("ramen");
        cache.record("pizza");
        cache.record("ramen");
        assert_eq!(cache.entries(), ["ramen", "pizza"]);
    }

    #[test]
    fn sixth_distinct_query_drops_oldest() {
        let mut cache = RecencyCache::default();
        for query in ["a", "b", "c", "d", "e"] {
            cache.record(query);
        }
        assert_eq!(cache.len(), 5);

        cache.record("f");
        assert_eq!(cache.entries(), ["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn from_entries_repairs_bad_data() {
        let stored = ["x", "y", "x", "z", "w", "v", "u"].map(String::from).to_vec();
        let cache = RecencyCache::from_entries(stored);
        assert_eq!(cache.entries(), ["x", "y", "z", "w", "v"]);
    }

    #[test]
    fn merge_keeps_session_entries_first() {
        let mut cache = RecencyCache::default();
        cache.record("new");
        cache.merge_loaded(["old", "new", "older"].map(String::from).to_vec());
        assert_eq!(cache.entries(), ["new", "old", "older"]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut cache = RecencyCache::default();
        cache.record("sushi");
        assert_eq!(serde_json::to_string(&cache).unwrap(), r#"["sushi"]"#);
    }
}
