//! Lookup client configuration.
//!
//! The API key is required and resolved once at startup; a missing key fails
//! here instead of on the first lookup.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::util::{is_http_url, normalize_text_option};

pub const API_KEY_VAR: &str = "SITECHECK_API_KEY";
pub const ENDPOINT_VAR: &str = "SITECHECK_ENDPOINT";
pub const TIMEOUT_VAR: &str = "SITECHECK_TIMEOUT_SECS";

pub const DEFAULT_ENDPOINT: &str = "https://safebrowsing.googleapis.com/v4/threatMatches:find";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const MAX_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "Kunci API Safe Browsing belum diatur. Atur SITECHECK_API_KEY atau jalankan `sitecheck key set`."
    )]
    MissingApiKey,
    #[error("Konfigurasi tidak valid: {0}")]
    Invalid(String),
}

/// Everything the lookup client needs: where to send, how to authenticate,
/// and how long to wait.
#[derive(Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl fmt::Debug for LookupConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LookupConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LookupConfig {
    /// Config for the public Safe Browsing endpoint with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key =
            normalize_text_option(Some(api_key.into())).ok_or(ConfigError::MissingApiKey)?;
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        self.endpoint = normalize_endpoint(endpoint.into())?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "batas waktu pemeriksaan harus lebih dari nol".to_string(),
            ));
        }
        self.timeout = timeout;
        Ok(self)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    /// Resolve config from an arbitrary key/value source.
    ///
    /// Public so callers can layer other secret sources (e.g. a keychain)
    /// under the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = normalize_text_option(lookup(API_KEY_VAR)).ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key)?;

        if let Some(endpoint) = normalize_text_option(lookup(ENDPOINT_VAR)) {
            config = config.with_endpoint(endpoint)?;
        }

        if let Some(raw) = normalize_text_option(lookup(TIMEOUT_VAR)) {
            config = config.with_timeout(parse_timeout_secs(&raw)?)?;
        }

        Ok(config)
    }
}

/// Parse the [`TIMEOUT_VAR`] value: whole seconds in `[1, 120]`.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .and_then(timeout_from_secs)
        .ok_or_else(|| {
            ConfigError::Invalid(format!(
                "{TIMEOUT_VAR} harus bilangan bulat dalam [1, {MAX_TIMEOUT_SECS}]"
            ))
        })
}

/// `None` unless `secs` is in `[1, MAX_TIMEOUT_SECS]`.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (1..=MAX_TIMEOUT_SECS)
        .contains(&secs)
        .then_some(Duration::from_secs(secs))
}

fn normalize_endpoint(raw: String) -> Result<String, ConfigError> {
    let endpoint = normalize_text_option(Some(raw))
        .ok_or_else(|| ConfigError::Invalid("endpoint tidak boleh kosong".to_string()))?;
    if is_http_url(&endpoint) {
        Ok(endpoint.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::Invalid(format!(
            "{ENDPOINT_VAR} harus diawali http:// atau https://"
        )))
    }
}
