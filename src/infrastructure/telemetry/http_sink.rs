//! HTTP telemetry sink.

use super::service::{TelemetryError, TelemetryEvent, TelemetryResult, TelemetrySink};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::info;

/// Per-request timeout for the collector.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Retries after the first failed delivery.
const MAX_RETRIES: usize = 2;

/// POSTs each event as JSON to a collector endpoint.
///
/// Sends `Authorization: Bearer <token>` when a token is configured. Failed
/// deliveries are retried twice with jittered exponential backoff.
pub struct HttpSink {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpSink {
    /// Builds a sink for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Transport`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> TelemetryResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TelemetryError::Transport(e.to_string()))?;

        let endpoint = endpoint.into();
        info!("Telemetry enabled (HTTP collector at {})", endpoint);

        Ok(Self {
            client,
            endpoint,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    async fn post(&self, event: &TelemetryEvent) -> TelemetryResult<()> {
        let mut request = self.client.post(&self.endpoint).json(event);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TelemetryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Rejected(status.as_u16()));
        }

        Ok(())
    }
}

#[async_trait]
impl TelemetrySink for HttpSink {
    async fn send(&self, event: &TelemetryEvent) -> TelemetryResult<()> {
        let strategy = ExponentialBackoff::from_millis(50)
            .map(jitter)
            .take(MAX_RETRIES);

        Retry::spawn(strategy, || self.post(event)).await
    }
}
