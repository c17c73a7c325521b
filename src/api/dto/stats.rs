//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use crate::application::services::LinkStats;

/// Statistics for a single short link.
///
/// `expiry` carries the mapping's expiration instant.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
    pub click_count: usize,
    pub clicks: Vec<ClickInfo>,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            original_url: stats.original_url,
            short_code: stats.short_code,
            created_at: stats.created_at,
            expiry: stats.expires_at,
            click_count: stats.click_count,
            clicks: stats.clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
