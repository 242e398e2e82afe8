//! URL normalization and structural validation.
//!
//! User input is trimmed, given an `https://` scheme when it has none, and
//! then matched against a structural pattern before any lookup is attempted.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::util::is_http_url;

const DEFAULT_SCHEME: &str = "https://";

/// Scheme, then a dotted hostname with a 2-6 letter TLD, `localhost`, or a
/// dotted quad, then an optional port and an optional path/query.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://(?:(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,6}\.?|localhost|[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})(?::[0-9]+)?(?:/?|[/?]\S+)$",
    )
    .expect("Invalid URL pattern")
});

/// Reasons a raw input cannot be turned into a [`NormalizedUrl`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Masukkan URL terlebih dahulu")]
    Empty,

    #[error("'{input}' bukan URL yang valid; gunakan bentuk seperti https://example.com")]
    Malformed { input: String },
}

/// A URL with an explicit `http`/`https` scheme that passed structural
/// validation. Only [`normalize`] creates one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize raw user input into a [`NormalizedUrl`].
///
/// # Examples
///
/// ```
/// use sitecheck_core::url::normalize;
///
/// let url = normalize("  example.com ").unwrap();
/// assert_eq!(url.as_str(), "https://example.com");
/// assert!(normalize("not a url").is_err());
/// ```
pub fn normalize(raw: &str) -> Result<NormalizedUrl, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let candidate = if is_http_url(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{trimmed}")
    };

    if URL_PATTERN.is_match(&candidate) {
        Ok(NormalizedUrl(candidate))
    } else {
        Err(ValidationError::Malformed {
            input: trimmed.to_string(),
        })
    }
}
