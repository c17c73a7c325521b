//! PostgreSQL registry tests.
//!
//! Require a database: `DATABASE_URL=... cargo test -- --ignored`.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use ttl_shortener::domain::entities::{ClickEvent, Mapping};
use ttl_shortener::domain::repositories::UrlRegistry;
use ttl_shortener::error::AppError;
use ttl_shortener::infrastructure::persistence::PgUrlRegistry;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

fn registry(pool: PgPool) -> PgUrlRegistry {
    PgUrlRegistry::new(Arc::new(pool), Duration::from_secs(3))
}

fn mapping(code: &str) -> Mapping {
    Mapping::new(
        code.to_string(),
        "https://example.com".to_string(),
        t0(),
        t0() + TimeDelta::minutes(30),
    )
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_and_find(pool: PgPool) {
    let repo = registry(pool);

    repo.create_if_absent(mapping("pg0001")).await.unwrap();

    let found = repo.find("pg0001").await.unwrap().unwrap();
    assert_eq!(found, mapping("pg0001"));
    assert_eq!(found.expires_at - found.created_at, TimeDelta::minutes(30));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_unknown(pool: PgPool) {
    let repo = registry(pool);

    assert!(repo.find("nope").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_code_conflicts(pool: PgPool) {
    let repo = registry(pool);

    repo.create_if_absent(mapping("pg0002")).await.unwrap();

    let mut other = mapping("pg0002");
    other.original_url = "https://other.example.com".to_string();
    let err = repo.create_if_absent(other).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    let stored = repo.find("pg0002").await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://example.com");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_append_click_preserves_order(pool: PgPool) {
    let repo = registry(pool);
    repo.create_if_absent(mapping("pg0003")).await.unwrap();

    for i in 1..=3 {
        let referrer = format!("https://ref{i}.example");
        let event = ClickEvent::new(
            t0() + TimeDelta::minutes(i),
            Some(referrer.as_str()),
            None,
        );
        repo.append_click("pg0003", event).await.unwrap();
    }

    let found = repo.find("pg0003").await.unwrap().unwrap();
    let referrers: Vec<&str> = found.clicks.iter().map(|c| c.referrer.as_str()).collect();
    assert_eq!(
        referrers,
        vec![
            "https://ref1.example",
            "https://ref2.example",
            "https://ref3.example"
        ]
    );
    assert_eq!(found.clicks[0].location, "Unknown");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_append_click_unknown_code(pool: PgPool) {
    let repo = registry(pool);

    let err = repo
        .append_click("ghost", ClickEvent::new(t0(), None, None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_appends(pool: PgPool) {
    let repo = Arc::new(registry(pool));
    repo.create_if_absent(mapping("pg0004")).await.unwrap();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.append_click("pg0004", ClickEvent::new(t0(), None, None))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let found = repo.find("pg0004").await.unwrap().unwrap();
    assert_eq!(found.clicks.len(), 50);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_ping(pool: PgPool) {
    let repo = registry(pool);

    assert!(repo.ping().await.is_ok());
}
