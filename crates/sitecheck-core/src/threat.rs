//! Threat categories reported by Safe Browsing and their display labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Safe Browsing threat category.
///
/// Identifiers outside the known set are kept verbatim in [`ThreatType::Other`]
/// so new remote categories still round-trip and display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThreatType {
    Malware,
    SocialEngineering,
    UnwantedSoftware,
    PotentiallyHarmfulApplication,
    Other(String),
}

impl ThreatType {
    /// Categories every lookup asks the remote service about.
    pub const QUERIED: [Self; 4] = [
        Self::Malware,
        Self::SocialEngineering,
        Self::UnwantedSoftware,
        Self::PotentiallyHarmfulApplication,
    ];

    /// Wire identifier, e.g. `MALWARE`.
    pub fn code(&self) -> &str {
        match self {
            Self::Malware => "MALWARE",
            Self::SocialEngineering => "SOCIAL_ENGINEERING",
            Self::UnwantedSoftware => "UNWANTED_SOFTWARE",
            Self::PotentiallyHarmfulApplication => "POTENTIALLY_HARMFUL_APPLICATION",
            Self::Other(code) => code,
        }
    }

    /// Human-readable (Indonesian) label. Unknown codes label as themselves.
    pub fn label(&self) -> &str {
        match self {
            Self::Malware => "Perangkat lunak berbahaya (malware)",
            Self::SocialEngineering => "Rekayasa sosial (phishing)",
            Self::UnwantedSoftware => "Perangkat lunak yang tidak diinginkan",
            Self::PotentiallyHarmfulApplication => "Aplikasi yang berpotensi berbahaya",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for ThreatType {
    fn from(code: &str) -> Self {
        match code {
            "MALWARE" => Self::Malware,
            "SOCIAL_ENGINEERING" => Self::SocialEngineering,
            "UNWANTED_SOFTWARE" => Self::UnwantedSoftware,
            "POTENTIALLY_HARMFUL_APPLICATION" => Self::PotentiallyHarmfulApplication,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ThreatType {
    fn from(code: String) -> Self {
        match Self::from(code.as_str()) {
            Self::Other(_) => Self::Other(code),
            known => known,
        }
    }
}

impl From<ThreatType> for String {
    fn from(threat: ThreatType) -> Self {
        match threat {
            ThreatType::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for ThreatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Translate a raw threat identifier into its display label.
pub fn label(code: &str) -> String {
    ThreatType::from(code).label().to_string()
}
