//! Telemetry event model and sink trait.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Severity of a telemetry event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetryLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl fmt::Display for TelemetryLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

/// One log record shipped to the telemetry collector.
///
/// Serializes as `{"stack", "level", "package", "message"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetryEvent {
    pub stack: &'static str,
    pub level: TelemetryLevel,
    pub package: &'static str,
    pub message: String,
}

impl TelemetryEvent {
    /// Creates a backend event.
    pub fn backend(level: TelemetryLevel, package: &'static str, message: impl Into<String>) -> Self {
        Self {
            stack: "backend",
            level,
            package,
            message: message.into(),
        }
    }
}

/// Errors that can occur while delivering telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Telemetry transport error: {0}")]
    Transport(String),

    #[error("Telemetry collector rejected event with status {0}")]
    Rejected(u16),
}

/// Result type for telemetry delivery.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Destination for telemetry events.
///
/// Sinks are only ever called from the background worker, never from a
/// request path; their errors are logged and dropped there.
///
/// # Implementations
///
/// - [`crate::infrastructure::telemetry::HttpSink`] - POSTs events to a collector
/// - [`crate::infrastructure::telemetry::TracingSink`] - writes events to the log
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Delivers a single event.
    async fn send(&self, event: &TelemetryEvent) -> TelemetryResult<()>;
}
