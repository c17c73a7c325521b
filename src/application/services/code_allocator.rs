//! Short code allocation with uniqueness enforcement.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::UrlRegistry;
use crate::error::AppError;
use crate::utils::code_generator::{
    CodeGenerator, RESERVED_CODES, RandomCodeGenerator, validate_custom_code,
};

/// Number of random codes tried before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Binds a short code to a new mapping and claims it in the registry.
///
/// Claiming is the registry's atomic create-if-absent of the whole mapping, so
/// there is no window between checking a code and taking it.
pub struct CodeAllocator<R: UrlRegistry + ?Sized> {
    registry: Arc<R>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
}

impl<R: UrlRegistry + ?Sized> CodeAllocator<R> {
    /// Creates an allocator drawing random codes from [`RandomCodeGenerator`].
    pub fn new(registry: Arc<R>) -> Self {
        Self::with_generator(registry, Arc::new(RandomCodeGenerator))
    }

    /// Creates an allocator with a custom code source.
    pub fn with_generator(registry: Arc<R>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            registry,
            generator,
            max_attempts: MAX_ALLOCATION_ATTEMPTS,
        }
    }

    /// Allocates a code for `draft` and stores the resulting mapping.
    ///
    /// - With `requested`, the code is validated and claimed as-is.
    /// - Without it, random codes are claimed until one is free, at most
    ///   [`MAX_ALLOCATION_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the requested code is malformed.
    /// Returns [`AppError::Conflict`] if the requested code is taken.
    /// Returns [`AppError::Storage`] if every random attempt collided or the
    /// store failed.
    pub async fn allocate(
        &self,
        requested: Option<String>,
        draft: &NewMapping,
    ) -> Result<Mapping, AppError> {
        match requested {
            Some(code) => self.claim_requested(code, draft).await,
            None => self.claim_random(draft).await,
        }
    }

    async fn claim_requested(&self, code: String, draft: &NewMapping) -> Result<Mapping, AppError> {
        validate_custom_code(&code)?;

        let mapping = draft.with_code(code);
        self.registry
            .create_if_absent(mapping.clone())
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::conflict(
                    "Shortcode already in use",
                    json!({ "shortcode": mapping.short_code }),
                ),
                other => other,
            })?;

        Ok(mapping)
    }

    async fn claim_random(&self, draft: &NewMapping) -> Result<Mapping, AppError> {
        let mut attempt = 0;
        let mut skipped = 0;
        while attempt < self.max_attempts {
            let code = self.generator.generate();

            // Reserved codes are shadowed by static routes and never claimed.
            // Only a generator stuck on them starts spending attempts.
            if RESERVED_CODES.contains(&code.as_str()) {
                skipped += 1;
                if skipped > self.max_attempts {
                    attempt += 1;
                }
                debug!(code = %code, "Generated shortcode is reserved, redrawing");
                continue;
            }

            attempt += 1;
            let mapping = draft.with_code(code);

            match self.registry.create_if_absent(mapping.clone()).await {
                Ok(()) => return Ok(mapping),
                Err(AppError::Conflict { .. }) => {
                    debug!(
                        code = %mapping.short_code,
                        attempt,
                        "Generated shortcode collided, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = self.max_attempts,
            "Short code allocation exhausted"
        );
        Err(AppError::storage(
            "Failed to generate unique shortcode",
            json!({ "reason": "Too many collisions", "attempts": self.max_attempts }),
        ))
    }
}
