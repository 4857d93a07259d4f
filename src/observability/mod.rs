//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - Spans are written as OTLP JSON, one document per line, to
//!   `~/.local/share/zellij/foodquest/foodquest-otlp.json`
//! - The file rotates at 10 MB and keeps 3 backups
//! - The level comes from the `trace_level` plugin option (default `"info"`)
//!
//! The plugin and worker threads each call [`init_tracing`] once. Worker spans
//! are parented to plugin spans through the trace context carried in every
//! worker message.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL};

/// `service.name` resource attribute and instrumentation scope.
pub const SERVICE_NAME: &str = "FoodQuest";

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE: &str = "foodquest-otlp.json";
