//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.
//! Handlers report their outcome to the telemetry queue; a telemetry
//! failure never changes the response.

pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;

use crate::error::AppError;
use crate::infrastructure::telemetry::{Telemetry, TelemetryLevel};

const SUCCESS_PACKAGE: &str = "service";
const FAILURE_PACKAGE: &str = "handler";

/// Emits an `info` event for a completed operation.
fn report_success(telemetry: &Telemetry, message: String) {
    telemetry.info(SUCCESS_PACKAGE, message);
}

/// Emits a telemetry event describing a failed request.
///
/// Client errors are reported as `warn`, storage failures as `fatal`.
fn report_failure(telemetry: &Telemetry, operation: &str, err: &AppError) {
    let level = match err {
        AppError::Storage { .. } => TelemetryLevel::Fatal,
        _ => TelemetryLevel::Warn,
    };
    telemetry.emit(level, FAILURE_PACKAGE, format!("{operation}: {err}"));
}
