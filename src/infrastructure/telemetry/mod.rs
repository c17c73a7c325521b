//! Best-effort telemetry pipe.
//!
//! Request handlers emit [`TelemetryEvent`]s through a [`Telemetry`] handle.
//! A background worker forwards them to a [`TelemetrySink`]:
//! - [`HttpSink`] - POSTs to a remote collector
//! - [`TracingSink`] - writes to the application log
//!
//! Nothing in this module can fail a request.

mod http_sink;
mod service;
mod tracing_sink;
mod worker;

pub use http_sink::HttpSink;
pub use service::{TelemetryError, TelemetryEvent, TelemetryLevel, TelemetryResult, TelemetrySink};
pub use tracing_sink::TracingSink;
pub use worker::{Telemetry, run_telemetry_worker, spawn_telemetry_worker};
