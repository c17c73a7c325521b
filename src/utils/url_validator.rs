//! Syntactic URL shape validation.
//!
//! Accepts absolute `http`/`https` URLs and scheme-less `host.tld/path`
//! forms. Content is never fetched or inspected.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Optional http(s) scheme, dotted host, optional non-whitespace path.
pub static URL_SHAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?([\w\-]+\.)+[\w\-]+(/\S*)?$").expect("valid URL shape regex")
});

/// Errors reported for malformed URLs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlShapeError {
    #[error("URL is empty")]
    Empty,

    #[error("URL does not look like host.tld[/path] with an optional http(s) scheme")]
    BadShape,

    #[error("Invalid URL format: {0}")]
    Unparseable(String),
}

/// Checks that `input` is a syntactically valid absolute or scheme-less URL.
///
/// Scheme-relative input (`//host/path`) is checked without its leading
/// slashes.
///
/// # Errors
///
/// Returns [`UrlShapeError`] describing the first failed check.
pub fn validate_url_shape(input: &str) -> Result<(), UrlShapeError> {
    if input.trim().is_empty() {
        return Err(UrlShapeError::Empty);
    }

    let candidate = input.strip_prefix("//").unwrap_or(input);

    if !URL_SHAPE_REGEX.is_match(candidate) {
        return Err(UrlShapeError::BadShape);
    }

    let lower = candidate.to_ascii_lowercase();
    let absolute = if lower.starts_with("http://") || lower.starts_with("https://") {
        candidate.to_string()
    } else {
        format!("http://{candidate}")
    };

    let parsed = Url::parse(&absolute).map_err(|e| UrlShapeError::Unparseable(e.to_string()))?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlShapeError::Unparseable("missing host".to_string()));
    }

    Ok(())
}
