use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};
use crate::error::StorageError;

/// Raw string key/value persistence.
///
/// Implementations only move strings around; encoding and the "degrade to
/// empty" policy live in [`Storage`].
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed, failure-absorbing access to a [`KeyValueStore`].
///
/// Each key holds a JSON array. Reads return an empty `Vec` when the key is
/// absent, the content does not parse, the backend errors, or there is no
/// backend at all. Writes report success as a `bool` and never return an error.
#[derive(Clone)]
pub struct Storage {
    backend: Option<Arc<dyn KeyValueStore>>,
}

impl Storage {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Some(Arc::new(backend)),
        }
    }

    pub fn from_shared(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend: Some(backend) }
    }

    /// No persistence context: every read is empty and every write is dropped.
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn read<T>(&self, key: &str) -> Vec<T>
    where
        T: DeserializeOwned,
    {
        let Some(backend) = &self.backend else {
            debug!("Storage unavailable, read of {} is empty", key);
            return Vec::new();
        };

        let content = match backend.get(key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                debug!("Storage miss: {}", key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read {} from storage: {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&content) {
            Ok(data) => {
                debug!("Storage hit: {} (loaded {} items)", key, data.len());
                data
            }
            Err(e) => {
                warn!("Stored value for {} is corrupted, treating as empty: {}", key, e);
                Vec::new()
            }
        }
    }

    pub fn write<T>(&self, key: &str, data: &[T]) -> bool
    where
        T: Serialize,
    {
        let Some(backend) = &self.backend else {
            debug!("Storage unavailable, dropping write of {}", key);
            return false;
        };

        let json = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize {} for storage: {}", key, e);
                return false;
            }
        };

        match backend.set(key, &json) {
            Ok(()) => {
                debug!("Storage saved: {} (saved {} items)", key, data.len());
                true
            }
            Err(e) => {
                warn!("Failed to write {} to storage: {}", key, e);
                false
            }
        }
    }

    /// Remove `key` entirely
    pub fn clear(&self, key: &str) -> bool {
        let Some(backend) = &self.backend else {
            return false;
        };

        match backend.remove(key) {
            Ok(()) => {
                debug!("Storage cleared: {}", key);
                true
            }
            Err(e) => {
                warn!("Failed to clear {} from storage: {}", key, e);
                false
            }
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("available", &self.is_available())
            .finish()
    }
}

/// One `<key>.json` file per key inside a directory.
///
/// The directory is created on first write. Writes go to a temp file that is
/// renamed over the target, so a crash mid-write leaves the old value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value).map_err(|source| StorageError::Io {
            path: temp_path.clone(),
            source,
        })?;
        std::fs::rename(&temp_path, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;
    use viewstate_models::HistoryEntry;

    /// Backend that fails every call, like a disabled or full storage area.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    fn entry(id: &str, minute: u32) -> HistoryEntry {
        HistoryEntry {
            content_id: id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 12, 1, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let storage = Storage::new(MemoryStore::new());
        let entries: Vec<HistoryEntry> = (0..20).map(|i| entry(&i.to_string(), i)).collect();

        assert!(storage.write("watch_history", &entries));
        let loaded: Vec<HistoryEntry> = storage.read("watch_history");
        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_missing_key_reads_empty() {
        let storage = Storage::new(MemoryStore::new());
        let loaded: Vec<HistoryEntry> = storage.read("watch_history");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_unavailable_storage_is_a_no_op() {
        let storage = Storage::unavailable();
        assert!(!storage.is_available());
        assert!(!storage.write("watch_history", &[entry("1", 0)]));
        let loaded: Vec<HistoryEntry> = storage.read("watch_history");
        assert!(loaded.is_empty());
        assert!(!storage.clear("watch_history"));
    }

    #[test]
    fn test_corrupted_content_reads_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.set("watch_history", "{not json").unwrap();
        let storage = Storage::from_shared(backend.clone());

        let loaded: Vec<HistoryEntry> = storage.read("watch_history");
        assert!(loaded.is_empty());

        // Wrong shape is treated the same as broken JSON
        backend.set("watch_history", r#"{"content_id":"1"}"#).unwrap();
        let loaded: Vec<HistoryEntry> = storage.read("watch_history");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_backend_failures_are_absorbed() {
        let storage = Storage::new(BrokenStore);
        assert!(storage.is_available());
        assert!(!storage.write("watch_history", &[entry("1", 0)]));
        let loaded: Vec<HistoryEntry> = storage.read("watch_history");
        assert!(loaded.is_empty());
        assert!(!storage.clear("watch_history"));
    }

    #[test]
    fn test_write_only_touches_named_key() {
        let backend = Arc::new(MemoryStore::new());
        backend.set("watchlist", "[]").unwrap();
        let storage = Storage::from_shared(backend.clone());

        storage.write("watch_history", &[entry("1", 0)]);
        assert_eq!(backend.get("watchlist").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("storage"));

        assert_eq!(store.get("watchlist").unwrap(), None);
        store.set("watchlist", "[1,2]").unwrap();
        assert!(dir.path().join("storage/watchlist.json").exists());
        assert!(!dir.path().join("storage/watchlist.json.tmp").exists());
        assert_eq!(store.get("watchlist").unwrap().as_deref(), Some("[1,2]"));

        store.set("watchlist", "[3]").unwrap();
        assert_eq!(store.get("watchlist").unwrap().as_deref(), Some("[3]"));

        store.remove("watchlist").unwrap();
        assert_eq!(store.get("watchlist").unwrap(), None);
        // Removing an absent key is fine
        store.remove("watchlist").unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.get("../etc/passwd"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.set("", "[]"), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_file_store_corruption_is_overwritten_by_next_write() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("watch_history.json"), "garbage").unwrap();
        let storage = Storage::new(FileStore::new(dir.path()));

        let loaded: Vec<HistoryEntry> = storage.read("watch_history");
        assert!(loaded.is_empty());

        assert!(storage.write("watch_history", &[entry("7", 5)]));
        let loaded: Vec<HistoryEntry> = storage.read("watch_history");
        assert_eq!(loaded, vec![entry("7", 5)]);
    }
}
