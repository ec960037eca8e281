//! Per-run deduplication of cross-platform sources.

use std::collections::HashSet;

/// Filter rejecting cross-platform sources already admitted once.
///
/// Sources reachable from several navigation categories arrive flagged as
/// cross-platform; the first arrival is admitted and remembered, later
/// arrivals are rejected. Unflagged sources always pass and leave no
/// trace. State lives for the life of the gate and is never persisted;
/// cross-run suppression belongs to whoever decides how the ledger is
/// opened.
#[derive(Debug, Default)]
pub struct DedupGate {
    seen: HashSet<String>,
}

impl DedupGate {
    /// Creates an empty gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether a source should be processed.
    ///
    /// Returns `false` only for a cross-platform URL this gate has already
    /// admitted.
    pub fn admit(&mut self, url: &str, cross_platform: bool) -> bool {
        if !cross_platform {
            return true;
        }
        if self.seen.contains(url) {
            tracing::debug!(url = %url, "rejecting already-admitted cross-platform source");
            return false;
        }
        self.seen.insert(url.to_string());
        true
    }

    /// Number of cross-platform URLs admitted so far.
    pub fn admitted(&self) -> usize {
        self.seen.len()
    }
}
