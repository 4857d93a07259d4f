//! JSON file-based recent-search storage.
//!
//! The file holds a single JSON array of strings:
//!
//! ```json
//! ["sushi", "cheap tacos", "ramen near me"]
//! ```
//!
//! Writes go to a temporary sibling first and are renamed into place, so a
//! crash mid-write never leaves a truncated file behind.

use crate::domain::error::{FoodQuestError, Result};
use crate::domain::RecencyCache;
use crate::storage::backend::RecencyStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the recent-search list inside the data directory.
pub const RECENT_SEARCHES_FILE: &str = "recentSearches.json";

/// Recent-search list persisted as a JSON array on disk.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It's designed to be used from a single
/// worker thread, matching the Zellij plugin architecture.
#[derive(Debug)]
pub struct JsonRecencyStore {
    file_path: PathBuf,
}

impl JsonRecencyStore {
    /// Opens a store backed by `file_path`, creating parent directories.
    ///
    /// The file itself is not created until the first [`save`](RecencyStore::save).
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use foodquest::storage::JsonRecencyStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonRecencyStore::new(PathBuf::from("/tmp/foodquest/recentSearches.json"))?;
    /// # Ok::<(), foodquest::FoodQuestError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON recency store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl RecencyStore for JsonRecencyStore {
    fn load(&self) -> Result<Vec<String>> {
        let _span = tracing::debug_span!("json_load_recent", path = ?self.file_path).entered();

        let contents = match std::fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no recent searches saved yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<RecencyCache>(&contents) {
            Ok(cache) => {
                tracing::debug!(count = cache.len(), "recent searches loaded");
                Ok(cache.into())
            }
            Err(e) => {
                tracing::debug!(error = %e, "recent searches file is corrupt, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&mut self, entries: &[String]) -> Result<()> {
        let _span = tracing::debug_span!("json_save_recent", count = entries.len()).entered();

        let json = serde_json::to_string(entries)
            .map_err(|e| FoodQuestError::Storage(format!("failed to serialize recent searches: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("recent searches saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonRecencyStore {
        JsonRecencyStore::new(dir.path().join("nested").join(RECENT_SEARCHES_FILE)).unwrap()
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for garbage in ["{not json", r#"{"recentSearches": 1}"#, "[1, 2, 3]"] {
            std::fs::write(store.path(), garbage).unwrap();
            assert!(store.load().unwrap().is_empty(), "{garbage} should load empty");
        }
    }

    #[test]
    fn save_then_load_returns_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let entries = vec!["ramen".to_string(), "pho".to_string()];

        store.save(&entries).unwrap();
        assert_eq!(store.load().unwrap(), entries);
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), r#"["ramen","pho"]"#);
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn oversized_file_is_capped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"["a","b","a","c","d","e","f","g"]"#).unwrap();

        assert_eq!(store.load().unwrap(), ["a", "b", "c", "d", "e"]);
    }
}
