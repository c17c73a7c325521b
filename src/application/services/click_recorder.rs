//! Click recording for successful redirects.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::entities::ClickEvent;
use crate::domain::repositories::UrlRegistry;
use crate::error::AppError;

/// Appends one [`ClickEvent`] per successful redirect.
///
/// Only called after the mapping was found and judged live; lookups that
/// fail or hit an expired mapping are never recorded.
pub struct ClickRecorder<R: UrlRegistry + ?Sized> {
    registry: Arc<R>,
}

impl<R: UrlRegistry + ?Sized> ClickRecorder<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Builds a click stamped with `now` and appends it atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Storage`] on store failure.
    pub async fn record(
        &self,
        code: &str,
        referrer: Option<&str>,
        location: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ClickEvent, AppError> {
        let event = ClickEvent::new(now, referrer, location);
        self.registry.append_click(code, event.clone()).await?;

        debug!(code, referrer = %event.referrer, location = %event.location, "Click recorded");
        Ok(event)
    }
}
