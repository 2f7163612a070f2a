use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use viewstate_models::HistoryEntry;
use crate::clock::Clock;
use crate::storage::Storage;

pub const WATCH_HISTORY_KEY: &str = "watch_history";

/// Recently watched titles, most recent first.
///
/// Holds at most one entry per `content_id` and at most `capacity` entries.
/// Every operation reads the persisted array fresh, so two stores sharing a
/// backend always agree.
pub struct HistoryStore {
    storage: Storage,
    clock: Arc<dyn Clock>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>, capacity: usize) -> Self {
        Self {
            storage,
            clock,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a play of `content_id`.
    ///
    /// Any earlier entry for the same id is replaced by a fresh one at the
    /// head; the oldest entries beyond capacity are dropped. Returns the new
    /// entry, or `None` for a blank id. The entry is returned even if storage
    /// dropped the write.
    pub fn record(&self, content_id: &str) -> Option<HistoryEntry> {
        let content_id = crate::normalize_id(content_id)?;

        let mut history = self.list();
        history.retain(|entry| entry.content_id != content_id);

        let entry = HistoryEntry {
            content_id: content_id.to_string(),
            timestamp: self.clock.now(),
        };
        history.insert(0, entry.clone());

        if history.len() > self.capacity {
            let evicted = history.len() - self.capacity;
            history.truncate(self.capacity);
            debug!("Watch history full, evicted {} oldest entries", evicted);
        }

        self.storage.write(WATCH_HISTORY_KEY, &history);
        Some(entry)
    }

    /// Entries in stored order, most recent first
    pub fn list(&self) -> Vec<HistoryEntry> {
        let stored: Vec<HistoryEntry> = self.storage.read(WATCH_HISTORY_KEY);
        let stored_len = stored.len();

        // Hand-edited or older data may break the invariants; repair on read
        let mut seen = HashSet::new();
        let mut history: Vec<HistoryEntry> = stored
            .into_iter()
            .filter_map(|mut entry| {
                let id = crate::normalize_id(&entry.content_id)?.to_string();
                if !seen.insert(id.clone()) {
                    return None;
                }
                entry.content_id = id;
                Some(entry)
            })
            .collect();
        history.truncate(self.capacity);

        if history.len() != stored_len {
            debug!(
                "Watch history repaired on read: {} stored, {} kept",
                stored_len,
                history.len()
            );
        }
        history
    }

    pub fn last_watched(&self, content_id: &str) -> Option<DateTime<Utc>> {
        let content_id = crate::normalize_id(content_id)?;
        self.list()
            .into_iter()
            .find(|entry| entry.content_id == content_id)
            .map(|entry| entry.timestamp)
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    pub fn clear(&self) -> bool {
        let cleared = self.storage.clear(WATCH_HISTORY_KEY);
        if cleared {
            info!("Watch history cleared");
        }
        cleared
    }
}
