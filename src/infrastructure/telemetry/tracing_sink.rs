//! Telemetry sink that writes to the application log.

use super::service::{TelemetryEvent, TelemetryLevel, TelemetryResult, TelemetrySink};
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

/// Writes telemetry events through `tracing` under the `telemetry` target.
///
/// Used when no collector endpoint is configured.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        debug!("Telemetry collector disabled, events go to the log");
        Self
    }
}

#[async_trait]
impl TelemetrySink for TracingSink {
    async fn send(&self, event: &TelemetryEvent) -> TelemetryResult<()> {
        let package = event.package;
        let message = event.message.as_str();

        match event.level {
            TelemetryLevel::Debug => debug!(target: "telemetry", package, "{message}"),
            TelemetryLevel::Info => info!(target: "telemetry", package, "{message}"),
            TelemetryLevel::Warn => warn!(target: "telemetry", package, "{message}"),
            TelemetryLevel::Error | TelemetryLevel::Fatal => {
                error!(target: "telemetry", package, level = %event.level, "{message}")
            }
        }

        Ok(())
    }
}
