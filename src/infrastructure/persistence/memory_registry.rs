//! In-process implementation of the URL registry.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{ClickEvent, Mapping};
use crate::domain::repositories::UrlRegistry;
use crate::error::AppError;

/// Registry backed by a sharded concurrent map.
///
/// Insert and append each hold the key's shard lock for the whole operation,
/// which makes create-if-absent linearizable per code and keeps concurrent
/// appends from overwriting each other. Contents live only as long as the
/// process.
#[derive(Debug, Default)]
pub struct MemoryUrlRegistry {
    mappings: DashMap<String, Mapping>,
}

impl MemoryUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings, live or expired.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[async_trait]
impl UrlRegistry for MemoryUrlRegistry {
    async fn create_if_absent(&self, mapping: Mapping) -> Result<(), AppError> {
        match self.mappings.entry(mapping.short_code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Shortcode already in use",
                json!({ "shortcode": mapping.short_code }),
            )),
            Entry::Vacant(slot) => {
                slot.insert(mapping);
                Ok(())
            }
        }
    }

    async fn find(&self, short_code: &str) -> Result<Option<Mapping>, AppError> {
        Ok(self.mappings.get(short_code).map(|m| m.value().clone()))
    }

    async fn append_click(&self, short_code: &str, event: ClickEvent) -> Result<(), AppError> {
        match self.mappings.get_mut(short_code) {
            Some(mut mapping) => {
                mapping.clicks.push(event);
                Ok(())
            }
            None => Err(AppError::not_found(
                "Shortcode not found",
                json!({ "shortcode": short_code }),
            )),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};
    use std::sync::Arc;

    fn mapping(code: &str) -> Mapping {
        let now = Utc::now();
        Mapping::new(
            code.to_string(),
            "https://example.com".to_string(),
            now,
            now + TimeDelta::minutes(5),
        )
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let registry = MemoryUrlRegistry::new();
        let m = mapping("abc123");

        registry.create_if_absent(m.clone()).await.unwrap();

        let found = registry.find("abc123").await.unwrap();
        assert_eq!(found, Some(m));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let registry = MemoryUrlRegistry::new();
        assert!(registry.find("nope").await.unwrap().is_none());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts_and_keeps_original() {
        let registry = MemoryUrlRegistry::new();
        registry.create_if_absent(mapping("dup")).await.unwrap();

        let mut other = mapping("dup");
        other.original_url = "https://other.com".to_string();
        let result = registry.create_if_absent(other).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        let stored = registry.find("dup").await.unwrap().unwrap();
        assert_eq!(stored.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_codes_are_case_sensitive() {
        let registry = MemoryUrlRegistry::new();
        registry.create_if_absent(mapping("AbC")).await.unwrap();
        registry.create_if_absent(mapping("abc")).await.unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let registry = MemoryUrlRegistry::new();
        registry.create_if_absent(mapping("ord")).await.unwrap();

        let base = Utc::now();
        for i in 0..5 {
            let referrer = format!("r{i}");
            let event = ClickEvent::new(base - TimeDelta::seconds(i), Some(referrer.as_str()), None);
            registry.append_click("ord", event).await.unwrap();
        }

        let stored = registry.find("ord").await.unwrap().unwrap();
        let referrers: Vec<_> = stored.clicks.iter().map(|c| c.referrer.as_str()).collect();
        assert_eq!(referrers, vec!["r0", "r1", "r2", "r3", "r4"]);
    }

    #[tokio::test]
    async fn test_append_unknown_code() {
        let registry = MemoryUrlRegistry::new();
        let result = registry
            .append_click("ghost", ClickEvent::new(Utc::now(), None, None))
            .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_not_lost() {
        let registry = Arc::new(MemoryUrlRegistry::new());
        registry.create_if_absent(mapping("hot")).await.unwrap();

        let handles: Vec<_> = (0..200)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    registry
                        .append_click("hot", ClickEvent::new(Utc::now(), None, None))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = registry.find("hot").await.unwrap().unwrap();
        assert_eq!(stored.clicks.len(), 200);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_single_winner() {
        let registry = Arc::new(MemoryUrlRegistry::new());

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.create_if_absent(mapping("race")).await })
            })
            .collect();

        let mut ok = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => ok += 1,
                Err(AppError::Conflict { .. }) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(conflicts, 49);
    }
}
