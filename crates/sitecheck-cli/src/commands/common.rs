use std::env;
use std::time::Duration;

use serde::Serialize;
use sitecheck_core::config::{timeout_from_secs, API_KEY_VAR, MAX_TIMEOUT_SECS};
use sitecheck_core::util::normalize_text_option;
use sitecheck_core::{
    CheckResult, ConfigError, History, HistoryEntry, LookupConfig, Session, ThreatLookupClient,
    ValidationError,
};

use crate::error::CliError;
use crate::secret_store::{mask_api_key, ApiKeyStore};

#[derive(Debug, Serialize)]
pub struct CheckItem {
    pub ordinal: Option<usize>,
    pub input: String,
    pub url: Option<String>,
    pub status: &'static str,
    pub threats: Vec<ThreatItem>,
    pub cause: Option<&'static str>,
    pub message: Option<String>,
    pub checked_at: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ThreatItem {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Environment(String),
    Keychain(String),
    Missing,
}

pub fn open_session(timeout_secs: Option<u64>) -> Result<Session, CliError> {
    let config = resolve_lookup_config(timeout_secs)?;
    tracing::debug!(?config, "lookup configuration resolved");
    Ok(Session::new(ThreatLookupClient::new(config)?))
}

pub fn resolve_lookup_config(timeout_secs: Option<u64>) -> Result<LookupConfig, CliError> {
    resolve_lookup_config_with(|name| env::var(name).ok(), &ApiKeyStore::default(), timeout_secs)
}

/// Environment first, then the keychain for the API key only.
pub fn resolve_lookup_config_with(
    env_lookup: impl Fn(&str) -> Option<String>,
    store: &ApiKeyStore,
    timeout_secs: Option<u64>,
) -> Result<LookupConfig, CliError> {
    let stored_key = if normalize_text_option(env_lookup(API_KEY_VAR)).is_some() {
        None
    } else {
        store.load()?
    };

    let mut config = LookupConfig::from_lookup(|name| {
        normalize_text_option(env_lookup(name)).or_else(|| {
            if name == API_KEY_VAR {
                stored_key.clone()
            } else {
                None
            }
        })
    })?;

    if let Some(secs) = timeout_secs {
        config = config.with_timeout(timeout_flag(secs)?)?;
    }
    Ok(config)
}

fn timeout_flag(secs: u64) -> Result<Duration, ConfigError> {
    timeout_from_secs(secs).ok_or_else(|| {
        ConfigError::Invalid(format!(
            "--timeout harus dalam [1, {MAX_TIMEOUT_SECS}] detik, bukan {secs}"
        ))
    })
}

pub fn describe_key_source(
    env_lookup: impl Fn(&str) -> Option<String>,
    store: &ApiKeyStore,
) -> Result<KeySource, CliError> {
    if let Some(key) = normalize_text_option(env_lookup(API_KEY_VAR)) {
        return Ok(KeySource::Environment(mask_api_key(&key)));
    }
    Ok(store
        .load()?
        .map_or(KeySource::Missing, |key| KeySource::Keychain(mask_api_key(&key))))
}

pub const fn status_label(result: &CheckResult) -> &'static str {
    match result {
        CheckResult::Safe => "safe",
        CheckResult::Unsafe { .. } => "unsafe",
        CheckResult::Error(_) => "error",
    }
}

pub fn check_to_item(input: &str, entry: &HistoryEntry) -> CheckItem {
    let result = entry.result();
    CheckItem {
        ordinal: Some(entry.ordinal()),
        input: input.to_string(),
        url: Some(entry.url().to_string()),
        status: status_label(result),
        threats: result
            .threats()
            .iter()
            .map(|threat| ThreatItem {
                code: threat.code().to_string(),
                label: threat.label().to_string(),
            })
            .collect(),
        cause: result.error().map(sitecheck_core::LookupError::kind),
        message: result.error().map(ToString::to_string),
        checked_at: Some(entry.checked_at()),
    }
}

pub fn invalid_to_item(input: &str, error: &ValidationError) -> CheckItem {
    CheckItem {
        ordinal: None,
        input: input.to_string(),
        url: None,
        status: "invalid",
        threats: Vec::new(),
        cause: Some("validation"),
        message: Some(error.to_string()),
        checked_at: None,
    }
}

pub fn format_verdict(result: &CheckResult) -> String {
    match result {
        CheckResult::Safe => "AMAN     Situs ini aman dikunjungi.".to_string(),
        CheckResult::Unsafe { threats } => {
            let labels = threats
                .iter()
                .map(|threat| threat.label())
                .collect::<Vec<_>>()
                .join(", ");
            format!("BAHAYA   Situs ini berpotensi berbahaya! Jenis ancaman: {labels}")
        }
        CheckResult::Error(error) => format!("GALAT    [{}] {error}", error.kind()),
    }
}

pub fn format_check_line(entry: &HistoryEntry) -> String {
    format!("{}  {}", entry.url(), format_verdict(entry.result()))
}

pub fn format_invalid_line(input: &str, error: &ValidationError) -> String {
    let shown = input.trim();
    format!("{shown}  TIDAK VALID  {error}")
}

pub fn format_history_lines(history: &History) -> Vec<String> {
    history
        .entries()
        .iter()
        .map(|entry| {
            format!(
                "{:>3}. {}  {}",
                entry.ordinal(),
                format_check_timestamp(entry.checked_at()),
                format_check_line(entry)
            )
        })
        .collect()
}

pub fn format_check_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| date_time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}
