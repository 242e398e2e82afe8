//! Session-scoped, append-only record of past checks.

use crate::lookup::CheckResult;
use crate::url::NormalizedUrl;
use crate::util::unix_timestamp_ms_now;

/// Snapshot of one lookup. Fields are read-only once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    ordinal: usize,
    url: NormalizedUrl,
    result: CheckResult,
    checked_at: i64,
}

impl HistoryEntry {
    /// 1-based insertion position.
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub const fn url(&self) -> &NormalizedUrl {
        &self.url
    }

    pub const fn result(&self) -> &CheckResult {
        &self.result
    }

    /// Unix timestamp (ms) when the entry was recorded.
    pub const fn checked_at(&self) -> i64 {
        self.checked_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, url: NormalizedUrl, result: CheckResult) -> &HistoryEntry {
        let entry = HistoryEntry {
            ordinal: self.entries.len() + 1,
            url,
            result,
            checked_at: unix_timestamp_ms_now(),
        };
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
