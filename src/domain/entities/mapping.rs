//! Mapping entity: a short code bound to an original URL for a validity window.

use chrono::{DateTime, Utc};

use super::click::ClickEvent;

/// A short code mapped to its original URL.
///
/// Everything except `clicks` is fixed at creation. `clicks` only grows, in
/// the order the store accepted each append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: Vec<ClickEvent>,
}

impl Mapping {
    /// Creates a mapping with an empty click history.
    pub fn new(
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short_code,
            original_url,
            created_at,
            expires_at,
            clicks: Vec::new(),
        }
    }

    /// Absolute URL to send visitors to.
    ///
    /// Scheme-relative (`//host/path`) and scheme-less (`host/path`) URLs are
    /// stored as submitted; they are resolved against `http:` here.
    pub fn redirect_target(&self) -> String {
        let url = self.original_url.as_str();
        if url.starts_with("//") {
            format!("http:{url}")
        } else if has_scheme(url) {
            url.to_string()
        } else {
            format!("http://{url}")
        }
    }
}

/// Everything needed to create a mapping except its short code.
///
/// Handed to the code allocator, which binds a code and claims it in the
/// registry in one step.
#[derive(Debug, Clone)]
pub struct NewMapping {
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewMapping {
    pub fn with_code(&self, short_code: String) -> Mapping {
        Mapping::new(
            short_code,
            self.original_url.clone(),
            self.created_at,
            self.expires_at,
        )
    }
}

fn has_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
