//! Background worker thread for recent-search persistence.
//!
//! Uses Zellij's worker API for cross-thread communication and carries
//! tracing context across the boundary.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::FoodQuestWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
