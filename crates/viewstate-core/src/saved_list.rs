use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use viewstate_models::SavedEntry;
use crate::clock::Clock;
use crate::storage::Storage;

pub const WATCHLIST_KEY: &str = "watchlist";

/// Titles saved for later, most recently added first.
///
/// Unbounded, one entry per `content_id`. Adding an id that is already saved
/// keeps the original `added_at`.
pub struct SavedList {
    storage: Storage,
    clock: Arc<dyn Clock>,
}

impl SavedList {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Save `content_id`. Returns `true` if a new entry was created.
    pub fn add(&self, content_id: &str) -> bool {
        let Some(content_id) = crate::normalize_id(content_id) else {
            return false;
        };

        let mut saved = self.list();
        if saved.iter().any(|entry| entry.content_id == content_id) {
            debug!("{} already saved", content_id);
            return false;
        }

        saved.insert(
            0,
            SavedEntry {
                content_id: content_id.to_string(),
                added_at: self.clock.now(),
            },
        );
        self.storage.write(WATCHLIST_KEY, &saved);
        true
    }

    /// Unsave `content_id`. Returns `true` if an entry was removed.
    pub fn remove(&self, content_id: &str) -> bool {
        let Some(content_id) = crate::normalize_id(content_id) else {
            return false;
        };

        let mut saved = self.list();
        let before = saved.len();
        saved.retain(|entry| entry.content_id != content_id);
        if saved.len() == before {
            return false;
        }

        self.storage.write(WATCHLIST_KEY, &saved);
        true
    }

    /// Flip membership of `content_id`; returns whether it is saved afterwards
    pub fn toggle(&self, content_id: &str) -> bool {
        if self.contains(content_id) {
            self.remove(content_id);
            false
        } else {
            self.add(content_id)
        }
    }

    pub fn contains(&self, content_id: &str) -> bool {
        self.added_at(content_id).is_some()
    }

    pub fn added_at(&self, content_id: &str) -> Option<DateTime<Utc>> {
        let content_id = crate::normalize_id(content_id)?;
        self.list()
            .into_iter()
            .find(|entry| entry.content_id == content_id)
            .map(|entry| entry.added_at)
    }

    /// Entries in stored order, most recently added first
    pub fn list(&self) -> Vec<SavedEntry> {
        let stored: Vec<SavedEntry> = self.storage.read(WATCHLIST_KEY);
        let stored_len = stored.len();

        let mut seen = HashSet::new();
        let saved: Vec<SavedEntry> = stored
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

        if saved.len() != stored_len {
            debug!(
                "Watchlist repaired on read: {} stored, {} kept",
                stored_len,
                saved.len()
            );
        }
        saved
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    pub fn clear(&self) -> bool {
        let cleared = self.storage.clear(WATCHLIST_KEY);
        if cleared {
            info!("Watchlist cleared");
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::{KeyValueStore, MemoryStore};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 12, 0, 0).unwrap()
    }

    fn list() -> (SavedList, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        (SavedList::new(Storage::new(MemoryStore::new()), clock.clone()), clock)
    }

    fn ids(saved: &SavedList) -> Vec<String> {
        saved.list().into_iter().map(|e| e.content_id).collect()
    }

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let (saved, clock) = list();
        assert!(saved.add("3"));
        clock.advance(Duration::minutes(5));
        assert!(!saved.add("3"));

        assert_eq!(ids(&saved), vec!["3"]);
        assert!(saved.contains("3"));
        assert!(!saved.contains("99"));
        // Duplicate add does not refresh the timestamp
        assert_eq!(saved.added_at("3"), Some(start()));
    }

    #[test]
    fn test_add_inserts_at_head() {
        let (saved, clock) = list();
        saved.add("1");
        clock.advance(Duration::minutes(1));
        saved.add("2");
        clock.advance(Duration::minutes(1));
        saved.add("3");
        assert_eq!(ids(&saved), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_remove() {
        let (saved, _) = list();
        saved.add("1");
        saved.add("2");

        assert!(saved.remove("1"));
        assert!(!saved.contains("1"));
        assert_eq!(ids(&saved), vec!["2"]);

        // Absent id is a no-op
        assert!(!saved.remove("1"));
        assert!(!saved.remove("99"));
        assert_eq!(ids(&saved), vec!["2"]);
    }

    #[test]
    fn test_readd_after_remove_gets_new_timestamp() {
        let (saved, clock) = list();
        saved.add("1");
        saved.remove("1");
        clock.advance(Duration::hours(1));
        saved.add("1");
        assert_eq!(saved.added_at("1"), Some(start() + Duration::hours(1)));
    }

    #[test]
    fn test_contains_reflects_net_effect() {
        let (saved, _) = list();
        let ops: &[(&str, &str)] = &[
            ("add", "1"),
            ("add", "2"),
            ("add", "1"),
            ("remove", "3"),
            ("remove", "2"),
            ("add", "4"),
            ("remove", "1"),
            ("add", "1"),
        ];
        let mut expected = HashSet::new();
        for (op, id) in ops {
            match *op {
                "add" => {
                    saved.add(id);
                    expected.insert(*id);
                }
                _ => {
                    saved.remove(id);
                    expected.remove(id);
                }
            }
            for candidate in ["1", "2", "3", "4"] {
                assert_eq!(saved.contains(candidate), expected.contains(candidate));
            }
        }
        assert_eq!(ids(&saved), vec!["1", "4"]);
    }

    #[test]
    fn test_toggle() {
        let (saved, _) = list();
        assert!(saved.toggle("7"));
        assert!(saved.contains("7"));
        assert!(!saved.toggle("7"));
        assert!(!saved.contains("7"));
        assert!(!saved.toggle(""));
    }

    #[test]
    fn test_blank_id_is_a_no_op() {
        let (saved, _) = list();
        saved.add("1");
        assert!(!saved.add(""));
        assert!(!saved.remove("  "));
        assert!(!saved.contains(""));
        assert_eq!(ids(&saved), vec!["1"]);
    }

    #[test]
    fn test_unbounded() {
        let (saved, _) = list();
        for i in 0..100 {
            saved.add(&i.to_string());
        }
        assert_eq!(saved.len(), 100);
    }

    #[test]
    fn test_persisted_layout() {
        let backend = Arc::new(MemoryStore::new());
        let saved = SavedList::new(Storage::from_shared(backend.clone()), Arc::new(ManualClock::new(start())));
        saved.add("3");

        let raw = backend.get(WATCHLIST_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "content_id": "3", "added_at": "2024-12-01T12:00:00Z" }])
        );
    }

    #[test]
    fn test_unavailable_storage() {
        let saved = SavedList::new(Storage::unavailable(), Arc::new(ManualClock::new(start())));
        saved.add("1");
        assert!(!saved.contains("1"));
        assert!(saved.is_empty());
    }
}
