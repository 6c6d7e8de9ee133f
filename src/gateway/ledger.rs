// ABOUTME: Concurrent record of successfully dispatched messages keyed by message text
// ABOUTME: Shared by all dispatch workers and exposed upward only as a count

use dashmap::DashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Record of every successfully dispatched message, keyed by message text
/// with the epoch-millis timestamp of the last send.
///
/// Safe for simultaneous insertion from all dispatch workers without
/// external locking. Two known limitations are kept deliberately: entries
/// are keyed by text, so identical texts across calls overwrite one entry
/// rather than accumulating, and nothing is ever evicted.
#[derive(Debug, Default)]
pub struct SentMessageLedger {
    entries: DashMap<String, u64>,
}

impl SentMessageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` as sent now, overwriting any earlier entry for the
    /// same text.
    pub fn record(&self, text: &str) {
        self.entries.insert(text.to_owned(), now_millis());
    }

    /// Number of distinct message texts recorded.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Epoch-millis timestamp of the last send of `text`, if any.
    pub fn last_sent_at(&self, text: &str) -> Option<u64> {
        self.entries.get(text).map(|entry| *entry)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
