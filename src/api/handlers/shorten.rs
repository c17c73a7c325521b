//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use super::{report_failure, report_success};
use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "validity": 30,        // optional, minutes
///   "shortcode": "abc123"  // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortLink": "http://localhost:5000/abc123",
///   "expiry": "2025-01-01T12:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, URL, validity or shortcode.
/// Returns 409 Conflict if the shortcode is already in use.
/// Returns 500 Internal Server Error on storage failure.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    match create(&state, payload).await {
        Ok((code, response)) => {
            report_success(&state.telemetry, format!("Short URL created: {code}"));
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(err) => {
            report_failure(&state.telemetry, "Create short URL", &err);
            Err(err)
        }
    }
}

async fn create(
    state: &AppState,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(String, ShortenResponse), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let mapping = state.link_service.create_short_link(payload.into()).await?;

    let response = ShortenResponse {
        short_link: state.short_link(&mapping.short_code),
        expiry: mapping.expires_at,
    };

    Ok((mapping.short_code, response))
}
