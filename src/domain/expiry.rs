//! Validity window computation and liveness checks.

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;

use crate::domain::entities::Mapping;
use crate::error::AppError;

/// Validity applied when a creation request does not specify one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Computes expiry instants and decides whether a mapping is still live.
///
/// Expiry is never stored as a state; [`ExpiryPolicy::is_live`] is evaluated
/// fresh against the caller's `now` on every access.
#[derive(Debug, Clone, Copy)]
pub struct ExpiryPolicy {
    default_validity_minutes: i64,
}

impl ExpiryPolicy {
    /// Creates a policy with the given default validity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the default is not positive.
    pub fn new(default_validity_minutes: i64) -> Result<Self, AppError> {
        let default_validity_minutes = validate_minutes(default_validity_minutes)?;
        Ok(Self {
            default_validity_minutes,
        })
    }

    pub fn default_validity_minutes(&self) -> i64 {
        self.default_validity_minutes
    }

    /// Resolves the requested validity, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for zero or negative minutes.
    pub fn resolve_validity(&self, requested: Option<i64>) -> Result<i64, AppError> {
        match requested {
            Some(minutes) => validate_minutes(minutes),
            None => Ok(self.default_validity_minutes),
        }
    }

    /// Returns `created_at + validity_minutes`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the validity is not positive or the
    /// resulting instant is outside the representable range.
    pub fn compute_expiry(
        &self,
        created_at: DateTime<Utc>,
        validity_minutes: i64,
    ) -> Result<DateTime<Utc>, AppError> {
        let minutes = validate_minutes(validity_minutes)?;

        TimeDelta::try_minutes(minutes)
            .and_then(|delta| created_at.checked_add_signed(delta))
            .ok_or_else(|| {
                AppError::bad_request(
                    "Validity is too large",
                    json!({ "validity": validity_minutes }),
                )
            })
    }

    /// A mapping is live up to and including its expiry instant.
    pub fn is_live(&self, mapping: &Mapping, now: DateTime<Utc>) -> bool {
        now <= mapping.expires_at
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
        }
    }
}

fn validate_minutes(minutes: i64) -> Result<i64, AppError> {
    if minutes <= 0 {
        return Err(AppError::bad_request(
            "Validity must be a positive integer number of minutes",
            json!({ "validity": minutes }),
        ));
    }
    Ok(minutes)
}
