//! PostgreSQL implementation of the URL registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::domain::entities::{ClickEvent, Mapping};
use crate::domain::repositories::UrlRegistry;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct MappingRow {
    short_code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ClickRow {
    clicked_at: DateTime<Utc>,
    referrer: String,
    location: String,
}

/// PostgreSQL registry.
///
/// Mappings live in `mappings` keyed by `short_code`; clicks are rows of
/// `mapping_clicks` ordered by their serial id. Creation relies on
/// `ON CONFLICT DO NOTHING` and appends are single-row inserts, so neither
/// needs a read-modify-write of the mapping. Every operation is bounded by
/// `op_timeout`.
pub struct PgUrlRegistry {
    pool: Arc<PgPool>,
    op_timeout: Duration,
}

impl PgUrlRegistry {
    /// Creates a new registry with a database connection pool.
    pub fn new(pool: Arc<PgPool>, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.op_timeout.as_millis() as u64,
                    "Store operation timed out"
                );
                Err(AppError::storage(
                    "Storage timeout",
                    json!({ "operation": operation }),
                ))
            }
        }
    }
}

#[async_trait]
impl UrlRegistry for PgUrlRegistry {
    async fn create_if_absent(&self, mapping: Mapping) -> Result<(), AppError> {
        let result = self
            .bounded(
                "create_if_absent",
                sqlx::query(
                    r#"
                    INSERT INTO mappings (short_code, original_url, created_at, expires_at)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (short_code) DO NOTHING
                    "#,
                )
                .bind(&mapping.short_code)
                .bind(&mapping.original_url)
                .bind(mapping.created_at)
                .bind(mapping.expires_at)
                .execute(self.pool.as_ref()),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(
                "Shortcode already in use",
                json!({ "shortcode": mapping.short_code }),
            ));
        }

        Ok(())
    }

    async fn find(&self, short_code: &str) -> Result<Option<Mapping>, AppError> {
        self.bounded("find", fetch_mapping(self.pool.as_ref(), short_code))
            .await
    }

    async fn append_click(&self, short_code: &str, event: ClickEvent) -> Result<(), AppError> {
        let result = self
            .bounded(
                "append_click",
                sqlx::query(
                    r#"
                    INSERT INTO mapping_clicks (short_code, clicked_at, referrer, location)
                    SELECT short_code, $2, $3, $4
                    FROM mappings
                    WHERE short_code = $1
                    "#,
                )
                .bind(short_code)
                .bind(event.timestamp)
                .bind(&event.referrer)
                .bind(&event.location)
                .execute(self.pool.as_ref()),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Shortcode not found",
                json!({ "shortcode": short_code }),
            ));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.bounded(
            "ping",
            sqlx::query("SELECT 1").execute(self.pool.as_ref()),
        )
        .await
        .map(|_| ())
    }
}

async fn fetch_mapping(pool: &PgPool, short_code: &str) -> Result<Option<Mapping>, sqlx::Error> {
    let row = sqlx::query_as::<_, MappingRow>(
        r#"
        SELECT short_code, original_url, created_at, expires_at
        FROM mappings
        WHERE short_code = $1
        "#,
    )
    .bind(short_code)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let clicks = sqlx::query_as::<_, ClickRow>(
        r#"
        SELECT clicked_at, referrer, location
        FROM mapping_clicks
        WHERE short_code = $1
        ORDER BY id ASC
        "#,
    )
    .bind(short_code)
    .fetch_all(pool)
    .await?;

    Ok(Some(Mapping {
        short_code: row.short_code,
        original_url: row.original_url,
        created_at: row.created_at,
        expires_at: row.expires_at,
        clicks: clicks
            .into_iter()
            .map(|c| ClickEvent {
                timestamp: c.clicked_at,
                referrer: c.referrer,
                location: c.location,
            })
            .collect(),
    }))
}
