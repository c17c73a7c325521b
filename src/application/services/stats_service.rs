//! Click statistics for a single mapping.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::{ClickEvent, Mapping};
use crate::domain::repositories::UrlRegistry;
use crate::error::AppError;
use serde_json::json;

/// Summary of one mapping and its click history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: usize,
    pub clicks: Vec<ClickEvent>,
}

/// Projects a mapping into its statistics summary.
///
/// `click_count` is always derived from the click list.
pub fn summarize(mapping: Mapping) -> LinkStats {
    LinkStats {
        click_count: mapping.clicks.len(),
        original_url: mapping.original_url,
        short_code: mapping.short_code,
        created_at: mapping.created_at,
        expires_at: mapping.expires_at,
        clicks: mapping.clicks,
    }
}

/// Service for retrieving click statistics.
///
/// Stats are reported for live and expired mappings alike.
pub struct StatsService<R: UrlRegistry + ?Sized> {
    registry: Arc<R>,
}

impl<R: UrlRegistry + ?Sized> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Retrieves the statistics summary for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping matches the code.
    /// Returns [`AppError::Storage`] on store failure.
    pub async fn get_stats(&self, code: &str) -> Result<LinkStats, AppError> {
        self.registry
            .find(code)
            .await?
            .map(summarize)
            .ok_or_else(|| AppError::not_found("Shortcode not found", json!({ "shortcode": code })))
    }
}
