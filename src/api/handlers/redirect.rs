//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;

use super::{report_failure, report_success};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{shortcode}`
///
/// # Request Flow
///
/// 1. Look up the mapping
/// 2. Check it is live at the current instant
/// 3. Append a click (referrer from `Referer`, location from the peer address)
/// 4. Return 302 Found
///
/// The click is stored before the response is sent, so every 302 corresponds
/// to exactly one recorded click.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link has expired.
/// Returns 500 Internal Server Error on storage failure.
pub async fn redirect_handler(
    Path(shortcode): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let referrer = headers.get(header::REFERER).and_then(|v| v.to_str().ok());
    let location = addr.ip().to_string();

    let redirect = state
        .link_service
        .resolve_redirect(&shortcode, referrer, Some(&location))
        .await
        .inspect_err(|err| report_failure(&state.telemetry, "Redirect", err))?;

    report_success(&state.telemetry, format!("Redirected {shortcode}"));

    Ok((StatusCode::FOUND, [(header::LOCATION, redirect.target)]))
}
