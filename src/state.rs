//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, StatsService};
use crate::domain::clock::Clock;
use crate::domain::expiry::ExpiryPolicy;
use crate::domain::repositories::UrlRegistry;
use crate::infrastructure::telemetry::Telemetry;

/// Cloneable handle to the services, the registry and the telemetry queue.
///
/// Services are built over `dyn UrlRegistry` so the same state type works
/// with either store.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn UrlRegistry>>,
    pub stats_service: Arc<StatsService<dyn UrlRegistry>>,
    pub registry: Arc<dyn UrlRegistry>,
    pub telemetry: Telemetry,
    pub base_url: String,
}

impl AppState {
    /// Wires services around a registry.
    pub fn new(
        registry: Arc<dyn UrlRegistry>,
        expiry: ExpiryPolicy,
        clock: Arc<dyn Clock>,
        telemetry: Telemetry,
        base_url: impl Into<String>,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(registry.clone(), expiry, clock));
        let stats_service = Arc::new(StatsService::new(registry.clone()));

        Self {
            link_service,
            stats_service,
            registry,
            telemetry,
            base_url: base_url.into(),
        }
    }

    /// Public short link for `code`.
    pub fn short_link(&self, code: &str) -> String {
        self.link_service.get_short_url(&self.base_url, code)
    }
}
