//! In-memory recent-search storage.

use crate::domain::error::Result;
use crate::storage::backend::RecencyStore;

/// Keeps the list in memory for the lifetime of the worker.
///
/// The worker falls back to this store when the data directory cannot be
/// created, so recent searches still work for the current session.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecencyStore {
    entries: Vec<String>,
}

impl MemoryRecencyStore {
    #[must_use]
    pub fn with_entries(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

impl RecencyStore for MemoryRecencyStore {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[String]) -> Result<()> {
        self.entries = entries.to_vec();
        Ok(())
    }
}
