//! Search pipeline: compose a query, run it against the backend, filter what
//! comes back.
//!
//! # Modules
//!
//! - [`query`]: Validates input and builds the outbound request body
//! - [`session`]: Tracks the request lifecycle and supersedes stale responses
//! - [`filter`]: Re-applies the user's filters to the raw result set
//! - [`geolocation`]: Resolves the optional location fix attached to queries

pub mod filter;
pub mod geolocation;
pub mod query;
pub mod session;

pub use filter::{filter_results, matches, matching_indices};
pub use geolocation::{GeolocationProbe, ProbeState};
pub use query::{compose, SearchQuery};
pub use session::{Resolution, SearchSession, SearchTicket, SessionState, GENERIC_FAILURE_MESSAGE};
