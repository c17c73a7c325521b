mod common;

use async_trait::async_trait;
use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use ttl_shortener::api::handlers::health_handler;
use ttl_shortener::domain::entities::{ClickEvent, Mapping};
use ttl_shortener::domain::repositories::UrlRegistry;
use ttl_shortener::error::AppError;
use ttl_shortener::infrastructure::persistence::MemoryUrlRegistry;
use ttl_shortener::infrastructure::telemetry::TelemetryLevel;

/// Registry whose store is unreachable.
struct DownRegistry;

#[async_trait]
impl UrlRegistry for DownRegistry {
    async fn create_if_absent(&self, _mapping: Mapping) -> Result<(), AppError> {
        Err(AppError::storage("Store unavailable", json!({})))
    }

    async fn find(&self, _short_code: &str) -> Result<Option<Mapping>, AppError> {
        Err(AppError::storage("Store unavailable", json!({})))
    }

    async fn append_click(&self, _short_code: &str, _event: ClickEvent) -> Result<(), AppError> {
        Err(AppError::storage("Store unavailable", json!({})))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::storage("Store unavailable", json!({})))
    }
}

fn server(app: &common::TestApp) -> TestServer {
    let router = Router::new()
        .route("/health", get(health_handler))
        .with_state(app.state.clone());

    TestServer::new(router).unwrap()
}

#[tokio::test]
async fn test_health_check_healthy() {
    let app = common::create_test_app();
    let server = server(&app);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["checks"]["store"]["status"], "ok");
    assert_eq!(body["checks"]["telemetry"]["status"], "ok");
}

#[tokio::test]
async fn test_health_check_store_down() {
    let app = common::create_test_app_with_registry(
        Arc::new(DownRegistry),
        Arc::new(MemoryUrlRegistry::new()),
    );
    let server = server(&app);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["store"]["status"], "error");
    assert_eq!(body["checks"]["telemetry"]["status"], "ok");
}

#[tokio::test]
async fn test_health_check_telemetry_closed_stays_available() {
    let common::TestApp {
        state,
        telemetry_rx,
        ..
    } = common::create_test_app();
    drop(telemetry_rx);

    let router = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    let server = TestServer::new(router).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["store"]["status"], "ok");
    assert_eq!(body["checks"]["telemetry"]["status"], "error");
}

#[tokio::test]
async fn test_store_failure_surfaces_as_internal_error() {
    use ttl_shortener::api::handlers::redirect_handler;

    let mut app = common::create_test_app_with_registry(
        Arc::new(DownRegistry),
        Arc::new(MemoryUrlRegistry::new()),
    );
    let router = Router::new()
        .route("/{shortcode}", get(redirect_handler))
        .layer(common::MockConnectInfoLayer)
        .with_state(app.state.clone());
    let server = TestServer::new(router).unwrap();

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "internal_error");

    let events = app.telemetry_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, TelemetryLevel::Fatal);
    assert_eq!(events[0].package, "handler");
}
