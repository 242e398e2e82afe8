//! One interactive checking session: normalize, look up, record.

use crate::history::{History, HistoryEntry};
use crate::lookup::{ThreatLookup, ThreatLookupClient};
use crate::url::{normalize, ValidationError};

/// Owns the lookup client and the session history.
///
/// Invalid input is rejected before any lookup and is not recorded. Every
/// completed lookup, including failed ones, is appended to history.
#[derive(Debug)]
pub struct Session<L = ThreatLookupClient> {
    lookup: L,
    history: History,
}

impl<L: ThreatLookup> Session<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            history: History::new(),
        }
    }

    pub async fn check(&mut self, raw: &str) -> Result<&HistoryEntry, ValidationError> {
        let url = normalize(raw)?;
        let result = self.lookup.lookup(&url).await;
        Ok(self.history.append(url, result))
    }

    pub const fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        tracing::debug!("session history cleared");
    }
}
