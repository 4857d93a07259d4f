//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the plugin
//! thread and the background worker that owns the recent-search file. It also
//! carries distributed tracing context across the thread boundary so worker
//! spans nest under the plugin span that caused them.

use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if no OpenTelemetry layer is installed or the current
    /// span context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates builder methods for `WorkerMessage` variants that attach the
/// current trace context automatically.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_recent_searches(LoadRecentSearches {}),
    save_recent_searches(SaveRecentSearches { entries: Vec<String> }),
}

/// Messages sent from the plugin thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the persisted recent-search list.
    LoadRecentSearches {
        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Replace the persisted recent-search list.
    SaveRecentSearches {
        /// Most-recent-first queries, already deduplicated and capped.
        entries: Vec<String>,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The trace context attached to this message, if any.
    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadRecentSearches { trace_context } | Self::SaveRecentSearches { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker thread back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The persisted list was read (empty if missing or unreadable).
    RecentSearchesLoaded {
        /// Most-recent-first queries.
        entries: Vec<String>,
    },

    /// The list was written to disk.
    RecentSearchesSaved {
        /// Number of entries written.
        count: usize,
    },

    /// A storage operation failed.
    Error {
        /// Human-readable error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_round_trip_through_json() {
        let message = WorkerMessage::SaveRecentSearches {
            entries: vec!["sushi".to_string()],
            trace_context: Some(TraceContext {
                trace_id: "0".repeat(32),
                parent_span_id: "1".repeat(16),
            }),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(serde_json::from_str::<WorkerMessage>(&json).unwrap(), message);
    }

    #[test]
    fn missing_trace_context_is_omitted() {
        let message = WorkerMessage::LoadRecentSearches { trace_context: None };
        assert_eq!(
            serde_json::to_string(&message).unwrap(),
            r#"{"LoadRecentSearches":{}}"#
        );
        assert!(message.trace_context().is_none());
    }

    #[test]
    fn builders_work_without_a_tracer() {
        let message = WorkerMessage::save_recent_searches(vec!["a".to_string()]);
        assert!(matches!(
            message,
            WorkerMessage::SaveRecentSearches { ref entries, trace_context: None } if entries == &["a"]
        ));
    }
}
