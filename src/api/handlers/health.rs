//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store reachable; `status` is `degraded` if telemetry is down
/// - **503 Service Unavailable**: Store unreachable
///
/// # Components Checked
///
/// 1. **Store**: Registry ping
/// 2. **Telemetry**: Checks if the queue is open and reports free slots
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "Store reachable" },
///     "telemetry": { "status": "ok", "message": "Free slots: 1000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let telemetry_check = check_telemetry(&state);

    let store_up = store_check.is_ok();
    let all_healthy = store_up && telemetry_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            telemetry: telemetry_check,
        },
    };

    if store_up {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    match state.registry.ping().await {
        Ok(()) => CheckStatus::ok("Store reachable"),
        Err(e) => CheckStatus::error(format!("Store error: {}", e)),
    }
}

fn check_telemetry(state: &AppState) -> CheckStatus {
    if state.telemetry.is_open() {
        CheckStatus::ok(format!("Free slots: {}", state.telemetry.capacity()))
    } else {
        CheckStatus::error("Telemetry queue is closed")
    }
}
