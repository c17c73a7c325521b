//! Mapping creation and redirect resolution.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use serde_json::json;
use tracing::{debug, info};

use crate::application::services::click_recorder::ClickRecorder;
use crate::application::services::code_allocator::CodeAllocator;
use crate::domain::clock::Clock;
use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::expiry::ExpiryPolicy;
use crate::domain::repositories::UrlRegistry;
use crate::error::AppError;
use crate::utils::url_validator::validate_url_shape;

/// Input for creating a short link.
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub url: String,
    pub validity_minutes: Option<i64>,
    pub shortcode: Option<String>,
}

/// Outcome of a successful redirect lookup.
#[derive(Debug, Clone)]
pub struct Redirect {
    pub target: String,
}

/// Service for creating mappings and resolving redirects.
///
/// Creation runs URL validation, expiry computation, then code allocation
/// (which performs the atomic insert). Resolution runs lookup, liveness
/// check, then click recording.
pub struct LinkService<R: UrlRegistry + ?Sized> {
    registry: Arc<R>,
    allocator: CodeAllocator<R>,
    recorder: ClickRecorder<R>,
    expiry: ExpiryPolicy,
    clock: Arc<dyn Clock>,
}

impl<R: UrlRegistry + ?Sized> LinkService<R> {
    /// Creates a new link service with a random code allocator.
    pub fn new(registry: Arc<R>, expiry: ExpiryPolicy, clock: Arc<dyn Clock>) -> Self {
        let allocator = CodeAllocator::new(registry.clone());
        Self::with_allocator(registry, allocator, expiry, clock)
    }

    /// Creates a new link service with an explicit allocator.
    pub fn with_allocator(
        registry: Arc<R>,
        allocator: CodeAllocator<R>,
        expiry: ExpiryPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            recorder: ClickRecorder::new(registry.clone()),
            registry,
            allocator,
            expiry,
            clock,
        }
    }

    /// Creates a short link.
    ///
    /// `expires_at` is `created_at + validity` where validity defaults to the
    /// policy's default. Both instants are at microsecond precision, so the
    /// expiry returned to the caller is exactly the one every store keeps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL, validity, or custom code is
    /// malformed.
    /// Returns [`AppError::Conflict`] if the custom code already exists.
    /// Returns [`AppError::Storage`] on store failure or allocation exhaustion.
    pub async fn create_short_link(&self, request: CreateLink) -> Result<Mapping, AppError> {
        validate_url_shape(&request.url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let validity = self.expiry.resolve_validity(request.validity_minutes)?;
        let created_at = self.now();
        let expires_at = self.expiry.compute_expiry(created_at, validity)?;

        let draft = NewMapping {
            original_url: request.url,
            created_at,
            expires_at,
        };

        let mapping = self.allocator.allocate(request.shortcode, &draft).await?;

        info!(
            code = %mapping.short_code,
            expires_at = %mapping.expires_at,
            "Short URL created"
        );

        Ok(mapping)
    }

    /// Resolves a short code for a redirect and records the click.
    ///
    /// The click is appended only when the mapping exists and is live at the
    /// clock's current instant.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::Gone`] if the mapping has expired.
    /// Returns [`AppError::Storage`] on store failure.
    pub async fn resolve_redirect(
        &self,
        code: &str,
        referrer: Option<&str>,
        location: Option<&str>,
    ) -> Result<Redirect, AppError> {
        let mapping = self.get_mapping(code).await?;

        let now = self.now();
        if !self.expiry.is_live(&mapping, now) {
            debug!(code, expires_at = %mapping.expires_at, "Shortcode expired");
            return Err(AppError::gone(
                "Link expired",
                json!({ "shortcode": code, "expiry": mapping.expires_at }),
            ));
        }

        self.recorder.record(code, referrer, location, now).await?;

        Ok(Redirect {
            target: mapping.redirect_target(),
        })
    }

    /// Current instant truncated to the finest precision PostgreSQL stores.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(6)
    }

    /// Retrieves a mapping by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping matches the code.
    /// Returns [`AppError::Storage`] on store failure.
    pub async fn get_mapping(&self, code: &str) -> Result<Mapping, AppError> {
        self.registry
            .find(code)
            .await?
            .ok_or_else(|| AppError::not_found("Shortcode not found", json!({ "shortcode": code })))
    }

    /// Constructs the public short link for a code.
    pub fn get_short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}
