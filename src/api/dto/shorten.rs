//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CreateLink;

/// Request to shorten a single URL.
///
/// Custom code shape (alphanumeric, 1-10 characters, not reserved) is checked
/// by the allocator so that its error message is the same for every caller.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL. A scheme is optional.
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,

    /// Validity window in minutes.
    #[validate(range(min = 1, message = "Validity must be a positive integer"))]
    pub validity: Option<i64>,

    /// Optional custom short code.
    pub shortcode: Option<String>,
}

impl From<ShortenRequest> for CreateLink {
    fn from(request: ShortenRequest) -> Self {
        Self {
            url: request.url,
            validity_minutes: request.validity,
            shortcode: request.shortcode,
        }
    }
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_link: String,
    pub expiry: DateTime<Utc>,
}
