//! Error types for the FoodQuest plugin.
//!
//! This module defines the centralized error type [`FoodQuestError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Most variants never reach the user. Backend and decoding failures are folded
//! into a single generic message by the search session, and storage failures on
//! the recency cache are logged and recovered from.

use thiserror::Error;

/// The main error type for FoodQuest plugin operations.
///
/// # Examples
///
/// ```
/// use foodquest::FoodQuestError;
///
/// fn check_status(status: u16) -> Result<(), FoodQuestError> {
///     if (200..300).contains(&status) {
///         Ok(())
///     } else {
///         Err(FoodQuestError::Backend { status })
///     }
/// }
///
/// assert!(check_status(500).is_err());
/// ```
#[derive(Debug, Error)]
pub enum FoodQuestError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the recency store fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    ///
    /// Raised for malformed backend bodies and unreadable persisted data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The query text was empty after trimming, so no request was composed.
    #[error("search query is empty")]
    EmptyQuery,

    /// The search backend answered with a non-success HTTP status.
    ///
    /// Zellij also reports transport failures this way, with a 4xx status.
    #[error("search backend returned status {status}")]
    Backend {
        /// HTTP status code of the response.
        status: u16,
    },
}

/// A specialized `Result` type for FoodQuest operations.
pub type Result<T> = std::result::Result<T, FoodQuestError>;
