//! HTTP server initialization and runtime setup.
//!
//! Selects the registry, starts the telemetry worker and runs the Axum server
//! until Ctrl-C.

use crate::config::Config;
use crate::domain::clock::SystemClock;
use crate::domain::expiry::ExpiryPolicy;
use crate::domain::repositories::UrlRegistry;
use crate::infrastructure::persistence::{MIGRATOR, MemoryUrlRegistry, PgUrlRegistry};
use crate::infrastructure::telemetry::{
    HttpSink, TelemetrySink, TracingSink, spawn_telemetry_worker,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Builds the registry selected by the configuration.
///
/// With `DATABASE_URL` set, connects a PostgreSQL pool and applies the
/// embedded migrations. Otherwise returns an empty in-memory registry.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn connect_registry(config: &Config) -> Result<Arc<dyn UrlRegistry>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, mappings are kept in memory only");
        return Ok(Arc::new(MemoryUrlRegistry::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    Ok(Arc::new(PgUrlRegistry::new(
        Arc::new(pool),
        Duration::from_millis(config.store_timeout_ms),
    )))
}

/// Builds the telemetry sink selected by the configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_telemetry_sink(config: &Config) -> Result<Arc<dyn TelemetrySink>> {
    match &config.telemetry_url {
        Some(url) => {
            let sink = HttpSink::new(url.clone(), config.telemetry_token.clone())
                .context("Failed to build telemetry client")?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(TracingSink::new())),
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Registry (PostgreSQL or in-memory)
/// - Background telemetry worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let registry = connect_registry(&config).await?;

    let sink = build_telemetry_sink(&config)?;
    let telemetry = spawn_telemetry_worker(config.telemetry_queue_capacity, sink);
    tracing::info!("Telemetry worker started");

    let expiry = ExpiryPolicy::new(config.default_validity_minutes)?;
    let state = AppState::new(
        registry,
        expiry,
        Arc::new(SystemClock),
        telemetry.clone(),
        config.base_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");
    telemetry.info("server", format!("Server listening on {addr}"));

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
