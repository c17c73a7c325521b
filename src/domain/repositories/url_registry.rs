//! Repository trait for short-code mappings and their click history.

use crate::domain::entities::{ClickEvent, Mapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Key-addressed store of [`Mapping`]s.
///
/// Implementations must make [`create_if_absent`](UrlRegistry::create_if_absent)
/// linearizable per short code and must never lose a concurrent
/// [`append_click`](UrlRegistry::append_click). Nothing is ordered across
/// different short codes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryUrlRegistry`] - in-process store
/// - [`crate::infrastructure::persistence::PgUrlRegistry`] - PostgreSQL store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRegistry: Send + Sync {
    /// Inserts `mapping` unless its short code is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code exists, whether the existing
    /// mapping is live or expired.
    /// Returns [`AppError::Storage`] if the store fails or times out.
    async fn create_if_absent(&self, mapping: Mapping) -> Result<(), AppError>;

    /// Looks up a mapping with its full click history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store fails or times out.
    async fn find(&self, short_code: &str) -> Result<Option<Mapping>, AppError>;

    /// Appends one click to the mapping's history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this code.
    /// Returns [`AppError::Storage`] if the store fails or times out.
    async fn append_click(&self, short_code: &str, event: ClickEvent) -> Result<(), AppError>;

    /// Checks that the store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
