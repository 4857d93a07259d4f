//! Storage backend abstraction for the recent-search list.
//!
//! The trait is deliberately small: the worker only ever reads the whole list
//! once at startup and overwrites it after each successful search.

use crate::domain::error::Result;

/// Durable home for the recent-search list.
///
/// # Implementations
///
/// - [`JsonRecencyStore`](crate::storage::JsonRecencyStore): one JSON array
///   on disk, written atomically (default)
/// - [`MemoryRecencyStore`](crate::storage::MemoryRecencyStore): process
///   memory only, used in tests and when the data directory is unusable
///
/// # Examples
///
/// ```
/// use foodquest::storage::{MemoryRecencyStore, RecencyStore};
///
/// let mut store = MemoryRecencyStore::default();
/// store.save(&["sushi".to_string()])?;
/// assert_eq!(store.load()?, vec!["sushi".to_string()]);
/// # Ok::<(), foodquest::FoodQuestError>(())
/// ```
pub trait RecencyStore: Send {
    /// Reads the persisted list, most recent first.
    ///
    /// Missing or corrupt data is not an error: implementations return an
    /// empty list so the cache simply starts fresh.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying medium cannot be read at all.
    fn load(&self) -> Result<Vec<String>>;

    /// Replaces the persisted list.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, entries: &[String]) -> Result<()>;
}
