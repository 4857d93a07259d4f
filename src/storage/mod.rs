//! Storage layer for the recent-search list.
//!
//! Storage is only touched from the worker thread. The plugin thread keeps its
//! own [`RecencyCache`](crate::domain::RecencyCache) and sends the full list
//! to the worker after every change.
//!
//! # Modules
//!
//! - `backend`: [`RecencyStore`] trait abstraction
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: In-memory implementation

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::RecencyStore;
pub use json::{JsonRecencyStore, RECENT_SEARCHES_FILE};
pub use memory::MemoryRecencyStore;
