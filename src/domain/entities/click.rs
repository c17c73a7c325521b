//! Click entity representing a single successful redirect.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Referrer recorded when the request carried no `Referer` header.
pub const DIRECT_REFERRER: &str = "Direct";

/// Location recorded when the client address is unknown.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// One recorded visit to a short code.
///
/// Immutable once appended to a mapping's click history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    pub location: String,
}

impl ClickEvent {
    /// Builds a click event, substituting `"Direct"` for a missing or blank
    /// referrer and `"Unknown"` for a missing or blank location.
    pub fn new(timestamp: DateTime<Utc>, referrer: Option<&str>, location: Option<&str>) -> Self {
        Self {
            timestamp,
            referrer: non_blank(referrer).unwrap_or(DIRECT_REFERRER).to_string(),
            location: non_blank(location).unwrap_or(UNKNOWN_LOCATION).to_string(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
