//! Lookup outcomes and response classification.

use std::error::Error as _;

use reqwest::StatusCode;
use thiserror::Error;

use super::wire::{ApiErrorBody, Matches, ThreatMatchesResponse};
use crate::threat::ThreatType;
use crate::util::compact_text;

/// Why a lookup produced no verdict.
///
/// Holds rendered messages rather than the transport error so a failed
/// lookup can be stored in history and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Waktu pemeriksaan habis: {0}")]
    Timeout(String),

    #[error("Tidak dapat menghubungi layanan pemeriksaan: {0}")]
    Transport(String),

    /// 4xx: the request itself was refused, usually a bad or restricted API key.
    #[error("Pemeriksaan ditolak (HTTP {status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// 3xx (redirects are not followed), 5xx, or any other non-success status.
    #[error("Layanan pemeriksaan gagal (HTTP {status}): {detail}")]
    Upstream { status: u16, detail: String },

    #[error("Respons pemeriksaan tidak terduga: {0}")]
    UnexpectedResponse(String),
}

impl LookupError {
    /// Stable machine-readable cause tag.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Transport(_) => "transport",
            Self::Rejected { .. } => "rejected",
            Self::Upstream { .. } => "upstream",
            Self::UnexpectedResponse(_) => "unexpected_response",
        }
    }

    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        let is_timeout = error.is_timeout();
        // The request URL carries the API key.
        let message = describe(&error.without_url());
        if is_timeout {
            Self::Timeout(message)
        } else {
            Self::Transport(message)
        }
    }
}

/// Verdict of a single lookup. Exactly one variant per lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Safe,
    Unsafe { threats: Vec<ThreatType> },
    Error(LookupError),
}

impl CheckResult {
    pub const fn is_safe(&self) -> bool {
        matches!(self, Self::Safe)
    }

    pub const fn is_unsafe(&self) -> bool {
        matches!(self, Self::Unsafe { .. })
    }

    /// Threats in the order the remote service returned them.
    pub fn threats(&self) -> &[ThreatType] {
        match self {
            Self::Unsafe { threats } => threats,
            Self::Safe | Self::Error(_) => &[],
        }
    }

    pub const fn error(&self) -> Option<&LookupError> {
        match self {
            Self::Error(error) => Some(error),
            Self::Safe | Self::Unsafe { .. } => None,
        }
    }
}

/// Classify a completed HTTP exchange.
///
/// Public for testability; callers can exercise classification without
/// network access.
pub fn classify_response(status: StatusCode, body: &str) -> CheckResult {
    if !status.is_success() {
        let detail = parse_api_error(status, body);
        let status = status.as_u16();
        let error = if (400..500).contains(&status) {
            LookupError::Rejected { status, detail }
        } else {
            LookupError::Upstream { status, detail }
        };
        return CheckResult::Error(error);
    }

    // Derived struct deserializers also accept sequences, so `[]` would
    // otherwise read as "no matches".
    let payload = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(payload @ serde_json::Value::Object(_)) => payload,
        Ok(_) => return unexpected_response("bukan objek JSON", body),
        Err(error) => return unexpected_response(&error.to_string(), body),
    };
    let response = match serde_json::from_value::<ThreatMatchesResponse>(payload) {
        Ok(response) => response,
        Err(error) => return unexpected_response(&error.to_string(), body),
    };

    match response.into_matches() {
        Matches::Absent | Matches::Empty => CheckResult::Safe,
        Matches::Found(matches) => CheckResult::Unsafe {
            threats: matches.into_iter().map(|found| found.threat_type).collect(),
        },
    }
}

fn unexpected_response(reason: &str, body: &str) -> CheckResult {
    CheckResult::Error(LookupError::UnexpectedResponse(format!(
        "{reason} (body: {})",
        compact_text(body)
    )))
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(detail) = payload.error {
            match (detail.message, detail.status) {
                (Some(message), Some(code)) => return format!("{} [{code}]", message.trim()),
                (Some(message), None) => return message.trim().to_string(),
                (None, Some(code)) => return code,
                (None, None) => {}
            }
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string()
    } else {
        trimmed
    }
}

fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
