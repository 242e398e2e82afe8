//! Error types for sitecheck-core

use thiserror::Error;

/// Result type alias using sitecheck-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a lookup client
///
/// Per-check failures are not errors here: invalid input is a
/// [`crate::ValidationError`] and a failed lookup is a
/// [`crate::CheckResult::Error`]. Configuration problems surface earlier as
/// [`crate::ConfigError`].
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP client could not be constructed
    #[error("Gagal membuat klien HTTP: {0}")]
    HttpClient(String),
}
