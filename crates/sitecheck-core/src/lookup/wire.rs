//! JSON shapes exchanged with `threatMatches:find`.

use serde::{Deserialize, Serialize};

use crate::threat::ThreatType;
use crate::url::NormalizedUrl;

pub const CLIENT_ID: &str = "sitecheck";
pub const CLIENT_VERSION: &str = "1.0";
pub const PLATFORM_ANY: &str = "ANY_PLATFORM";
pub const ENTRY_TYPE_URL: &str = "URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatMatchesRequest {
    pub client: ClientInfo,
    pub threat_info: ThreatInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_id: String,
    pub client_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatInfo {
    pub threat_types: Vec<ThreatType>,
    pub platform_types: Vec<String>,
    pub threat_entry_types: Vec<String>,
    pub threat_entries: Vec<ThreatEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatEntry {
    pub url: String,
}

impl ThreatMatchesRequest {
    /// Request body asking about a single URL across every queried category.
    pub fn for_url(url: &NormalizedUrl) -> Self {
        Self {
            client: ClientInfo {
                client_id: CLIENT_ID.to_string(),
                client_version: CLIENT_VERSION.to_string(),
            },
            threat_info: ThreatInfo {
                threat_types: ThreatType::QUERIED.to_vec(),
                platform_types: vec![PLATFORM_ANY.to_string()],
                threat_entry_types: vec![ENTRY_TYPE_URL.to_string()],
                threat_entries: vec![ThreatEntry {
                    url: url.as_str().to_string(),
                }],
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreatMatchesResponse {
    #[serde(default)]
    matches: Option<Vec<ThreatMatch>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatMatch {
    pub threat_type: ThreatType,
    #[serde(default)]
    pub platform_type: Option<String>,
    #[serde(default)]
    pub threat_entry_type: Option<String>,
    #[serde(default)]
    pub threat: Option<ThreatEntry>,
    #[serde(default)]
    pub cache_duration: Option<String>,
}

/// The three states a `matches` field can be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matches {
    Absent,
    Empty,
    Found(Vec<ThreatMatch>),
}

impl ThreatMatchesResponse {
    pub fn into_matches(self) -> Matches {
        match self.matches {
            None => Matches::Absent,
            Some(matches) if matches.is_empty() => Matches::Empty,
            Some(matches) => Matches::Found(matches),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: Option<String>,
    pub status: Option<String>,
}
