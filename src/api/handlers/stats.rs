//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use super::{report_failure, report_success};
use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves statistics for a short link.
///
/// # Endpoint
///
/// `GET /shorturls/{shortcode}`
///
/// # Response
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "shortCode": "abc123",
///   "createdAt": "2025-01-01T12:00:00Z",
///   "expiry": "2025-01-01T12:30:00Z",
///   "clickCount": 1,
///   "clicks": [
///     { "timestamp": "2025-01-01T12:05:00Z", "referrer": "Direct", "location": "127.0.0.1" }
///   ]
/// }
/// ```
///
/// Expired links still report their statistics. Reading statistics does not
/// record a click.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(shortcode): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state
        .stats_service
        .get_stats(&shortcode)
        .await
        .inspect_err(|err| report_failure(&state.telemetry, "Fetch stats", err))?;

    report_success(&state.telemetry, format!("Stats fetched for {shortcode}"));

    Ok(Json(stats.into()))
}
