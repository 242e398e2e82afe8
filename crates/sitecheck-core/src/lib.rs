//! sitecheck-core - Core library for sitecheck
//!
//! URL normalization, the Safe Browsing lookup client, threat labels, and the
//! session history consumed by every sitecheck front end.

pub mod config;
pub mod error;
pub mod history;
pub mod lookup;
pub mod session;
pub mod threat;
pub mod url;
pub mod util;

pub use config::{ConfigError, LookupConfig};
pub use error::{Error, Result};
pub use history::{History, HistoryEntry};
pub use lookup::{CheckResult, LookupError, ThreatLookup, ThreatLookupClient};
pub use session::Session;
pub use threat::ThreatType;
pub use url::{normalize, NormalizedUrl, ValidationError};
