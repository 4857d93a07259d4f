//! Worker thread implementation for recent-search persistence.
//!
//! This module implements the Zellij worker thread interface. File I/O for the
//! recent-search list happens here so the plugin thread never blocks on disk.

use crate::domain::error::{FoodQuestError, Result};
use crate::infrastructure::paths;
use crate::storage::{JsonRecencyStore, MemoryRecencyStore, RecencyStore, RECENT_SEARCHES_FILE};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Runs on a separate thread spawned by Zellij. The store is opened lazily on
/// the first message.
#[derive(Serialize, Deserialize, Default)]
pub struct FoodQuestWorker {
    #[serde(skip)]
    store: Option<Box<dyn RecencyStore>>,
}

impl FoodQuestWorker {
    /// Creates a worker backed by the given store.
    #[must_use]
    pub fn with_store(store: Box<dyn RecencyStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Opens the JSON store in the plugin data directory, falling back to an
    /// in-memory store if the directory cannot be created.
    fn open_default_store() -> Box<dyn RecencyStore> {
        let path = paths::get_data_dir().join(RECENT_SEARCHES_FILE);
        match JsonRecencyStore::new(path) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "data directory unavailable, recent searches will not persist");
                Box::new(MemoryRecencyStore::default())
            }
        }
    }

    fn store(&mut self) -> Result<&mut Box<dyn RecencyStore>> {
        self.store
            .as_mut()
            .ok_or_else(|| FoodQuestError::Worker("store not initialized".to_string()))
    }

    /// Maps a storage result to a response with consistent logging.
    fn respond<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Rebuilds the plugin-side span context so worker spans link to the span
    /// that posted the message.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadRecentSearches { .. } => Self::respond(
                "load recent searches",
                self.store().and_then(|store| store.load()),
                |entries| WorkerResponse::RecentSearchesLoaded { entries },
            ),
            WorkerMessage::SaveRecentSearches { entries, .. } => {
                let count = entries.len();
                Self::respond(
                    "save recent searches",
                    self.store().and_then(|store| store.save(&entries)),
                    |()| WorkerResponse::RecentSearchesSaved { count },
                )
            }
        }
    }
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for FoodQuestWorker {
    /// Handles incoming messages from the plugin thread.
    ///
    /// Initializes tracing and the store on first use, deserializes the
    /// [`WorkerMessage`] payload, and posts the serialized
    /// [`WorkerResponse`] back under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        if self.store.is_none() {
            self.store = Some(Self::open_default_store());
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_through_messages() {
        let mut worker = FoodQuestWorker::with_store(Box::new(MemoryRecencyStore::default()));

        let saved = worker.handle_message(WorkerMessage::save_recent_searches(vec![
            "sushi".to_string(),
            "tacos".to_string(),
        ]));
        assert_eq!(saved, WorkerResponse::RecentSearchesSaved { count: 2 });

        let loaded = worker.handle_message(WorkerMessage::load_recent_searches());
        assert_eq!(
            loaded,
            WorkerResponse::RecentSearchesLoaded {
                entries: vec!["sushi".to_string(), "tacos".to_string()]
            }
        );
    }

    #[test]
    fn load_returns_existing_entries() {
        let store = MemoryRecencyStore::with_entries(vec!["ramen".to_string()]);
        let mut worker = FoodQuestWorker::with_store(Box::new(store));

        assert_eq!(
            worker.handle_message(WorkerMessage::load_recent_searches()),
            WorkerResponse::RecentSearchesLoaded {
                entries: vec!["ramen".to_string()]
            }
        );
    }

    #[test]
    fn uninitialized_store_reports_error() {
        let mut worker = FoodQuestWorker::default();
        let response = worker.handle_message(WorkerMessage::load_recent_searches());
        assert!(matches!(response, WorkerResponse::Error { ref message } if message.contains("not initialized")));
    }

    #[test]
    fn json_store_survives_worker_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RECENT_SEARCHES_FILE);

        let mut first = FoodQuestWorker::with_store(Box::new(JsonRecencyStore::new(path.clone()).unwrap()));
        first.handle_message(WorkerMessage::save_recent_searches(vec!["pho".to_string()]));

        let mut second = FoodQuestWorker::with_store(Box::new(JsonRecencyStore::new(path).unwrap()));
        assert_eq!(
            second.handle_message(WorkerMessage::load_recent_searches()),
            WorkerResponse::RecentSearchesLoaded {
                entries: vec!["pho".to_string()]
            }
        );
    }
}
