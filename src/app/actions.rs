//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It mutates [`AppState`]
//! and returns a `Vec<Action>`; the plugin shim in `main.rs` turns each action
//! into a host call (web request, worker post, command run).
//!
//! [`AppState`]: crate::app::AppState
//!
//! # Example
//!
//! ```rust
//! use foodquest::app::Action;
//! use foodquest::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_recent_searches()),
//!     Action::ProbeLocation { url: "https://ipapi.co/json".to_string() },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the background worker thread.
    ///
    /// Used for loading and saving recent searches without blocking the
    /// plugin thread on file I/O.
    PostToWorker(WorkerMessage),

    /// Sends a search request to the backend.
    ///
    /// The runtime must echo `token` back in the response event so the
    /// session can discard superseded responses.
    SendSearch {
        /// Submission token issued by the search session.
        token: u64,
        /// Backend endpoint.
        url: String,
        /// JSON request body.
        body: Vec<u8>,
    },

    /// Issues the one-shot geolocation lookup.
    ProbeLocation {
        /// Lookup endpoint returning a JSON position.
        url: String,
    },

    /// Opens a link (website or map) with the configured opener command.
    OpenUrl {
        /// Absolute URL to open.
        url: String,
    },
}
