//! Non-blocking telemetry queue and its background worker.

use super::service::{TelemetryEvent, TelemetryLevel, TelemetrySink};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Handle used by request paths to emit telemetry.
///
/// Emission is a `try_send` into a bounded channel: it never waits, and a
/// full or closed queue drops the event. Delivery and its failures happen on
/// the worker task spawned by [`spawn_telemetry_worker`].
#[derive(Clone, Debug)]
pub struct Telemetry {
    sender: mpsc::Sender<TelemetryEvent>,
}

impl Telemetry {
    /// Wraps an existing channel sender.
    pub fn new(sender: mpsc::Sender<TelemetryEvent>) -> Self {
        Self { sender }
    }

    /// Enqueues a backend event without blocking.
    pub fn emit(&self, level: TelemetryLevel, package: &'static str, message: impl Into<String>) {
        let event = TelemetryEvent::backend(level, package, message);
        if let Err(e) = self.sender.try_send(event) {
            debug!(error = %e, "Telemetry event dropped");
        }
    }

    pub fn info(&self, package: &'static str, message: impl Into<String>) {
        self.emit(TelemetryLevel::Info, package, message);
    }

    /// Returns `true` while the worker is still receiving.
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }

    /// Remaining queue slots.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}

/// Drains the queue into `sink` until every sender is dropped.
///
/// Sink errors are logged at `debug` and the event is discarded.
pub async fn run_telemetry_worker(
    mut rx: mpsc::Receiver<TelemetryEvent>,
    sink: Arc<dyn TelemetrySink>,
) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = sink.send(&event).await {
            debug!(error = %e, package = event.package, "Telemetry delivery failed");
        }
    }
    info!("Telemetry worker stopped");
}

/// Creates a bounded queue and spawns its worker on the current runtime.
pub fn spawn_telemetry_worker(capacity: usize, sink: Arc<dyn TelemetrySink>) -> Telemetry {
    let (tx, rx) = mpsc::channel(capacity);
    tokio::spawn(run_telemetry_worker(rx, sink));
    Telemetry::new(tx)
}
