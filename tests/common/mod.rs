#![allow(dead_code)]

use axum::extract::ConnectInfo;
use chrono::{DateTime, TimeZone, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;
use ttl_shortener::domain::clock::ManualClock;
use ttl_shortener::domain::entities::Mapping;
use ttl_shortener::domain::expiry::ExpiryPolicy;
use ttl_shortener::domain::repositories::UrlRegistry;
use ttl_shortener::infrastructure::persistence::MemoryUrlRegistry;
use ttl_shortener::infrastructure::telemetry::{Telemetry, TelemetryEvent};
use ttl_shortener::state::AppState;

pub const BASE_URL: &str = "http://localhost:5000";
pub const CLIENT_IP: &str = "127.0.0.1";

/// Everything a handler test needs to drive and observe the app.
pub struct TestApp {
    pub state: AppState,
    pub registry: Arc<MemoryUrlRegistry>,
    pub clock: Arc<ManualClock>,
    pub telemetry_rx: mpsc::Receiver<TelemetryEvent>,
}

impl TestApp {
    /// Drains the telemetry events emitted so far.
    pub fn telemetry_events(&mut self) -> Vec<TelemetryEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.telemetry_rx.try_recv() {
            events.push(event);
        }
        events
    }
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

pub fn create_test_app() -> TestApp {
    let registry = Arc::new(MemoryUrlRegistry::new());
    create_test_app_with_registry(registry.clone(), registry)
}

/// Builds state over an arbitrary registry, keeping a handle to the memory
/// registry for direct inspection.
pub fn create_test_app_with_registry(
    registry: Arc<dyn UrlRegistry>,
    memory: Arc<MemoryUrlRegistry>,
) -> TestApp {
    let clock = Arc::new(ManualClock::new(t0()));
    let (tx, rx) = mpsc::channel(1000);

    let state = AppState::new(
        registry,
        ExpiryPolicy::default(),
        clock.clone(),
        Telemetry::new(tx),
        BASE_URL,
    );

    TestApp {
        state,
        registry: memory,
        clock,
        telemetry_rx: rx,
    }
}

/// Inserts a mapping directly into the registry.
pub async fn create_test_mapping(
    registry: &MemoryUrlRegistry,
    code: &str,
    url: &str,
    validity_minutes: i64,
) -> Mapping {
    let created_at = t0();
    let expires_at = created_at + chrono::TimeDelta::minutes(validity_minutes);
    let mapping = Mapping::new(code.to_string(), url.to_string(), created_at, expires_at);
    registry.create_if_absent(mapping.clone()).await.unwrap();
    mapping
}

/// Injects a fixed peer address so handlers can use `ConnectInfo`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = format!("{CLIENT_IP}:12345").parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
