use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use viewstate_config::{Config, PathManager, StorageBackend};
use viewstate_models::{AnnotatedItem, CatalogItem, HistoryEntry};
use crate::catalog::CatalogIndex;
use crate::clock::{Clock, SystemClock};
use crate::composer::ViewComposer;
use crate::history::HistoryStore;
use crate::saved_list::SavedList;
use crate::storage::{FileStore, MemoryStore, Storage};

/// The viewing-state surface handed to the UI layer.
///
/// Mutations go straight through to storage; reads always reflect the last
/// write made through any handle sharing the same backend.
pub struct ViewingState {
    storage: Storage,
    catalog: Arc<CatalogIndex>,
    history: HistoryStore,
    saved: SavedList,
}

impl ViewingState {
    pub fn new(storage: Storage, catalog: Arc<CatalogIndex>, clock: Arc<dyn Clock>, history_capacity: usize) -> Self {
        Self {
            history: HistoryStore::new(storage.clone(), clock.clone(), history_capacity),
            saved: SavedList::new(storage.clone(), clock),
            storage,
            catalog,
        }
    }

    /// Build from configuration: storage backend, history capacity and catalog source
    pub fn from_config(config: &Config, paths: &PathManager) -> Result<Self> {
        config.validate()?;

        let catalog = match &config.catalog.path {
            Some(path) => CatalogIndex::load_from_file(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
            None => CatalogIndex::builtin(),
        };

        Ok(Self::new(
            storage_from_config(config, paths),
            Arc::new(catalog),
            Arc::new(SystemClock),
            config.history.capacity,
        ))
    }

    /// Whether a storage backend is attached; without one every write is dropped
    pub fn is_persistent(&self) -> bool {
        self.storage.is_available()
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn saved(&self) -> &SavedList {
        &self.saved
    }

    pub fn composer(&self) -> ViewComposer<'_> {
        ViewComposer::new(&self.catalog, &self.history, &self.saved)
    }

    /// Record a play
    pub fn record(&self, content_id: &str) -> Option<HistoryEntry> {
        self.history.record(content_id)
    }

    pub fn add(&self, content_id: &str) -> bool {
        self.saved.add(content_id)
    }

    pub fn remove(&self, content_id: &str) -> bool {
        self.saved.remove(content_id)
    }

    pub fn toggle(&self, content_id: &str) -> bool {
        self.saved.toggle(content_id)
    }

    pub fn contains(&self, content_id: &str) -> bool {
        self.saved.contains(content_id)
    }

    pub fn last_watched(&self, content_id: &str) -> Option<DateTime<Utc>> {
        self.history.last_watched(content_id)
    }

    pub fn project_history(&self) -> Vec<AnnotatedItem> {
        self.composer().project_history()
    }

    pub fn project_saved(&self) -> Vec<AnnotatedItem> {
        self.composer().project_saved()
    }

    pub fn details(&self, content_id: &str) -> Option<AnnotatedItem> {
        self.composer().details(content_id)
    }

    pub fn search(&self, query: &str) -> Vec<&CatalogItem> {
        self.catalog.search(query)
    }

    pub fn by_genre(&self, genre: &str) -> Vec<&CatalogItem> {
        self.catalog.by_genre(genre)
    }

    pub fn clear_history(&self) -> bool {
        self.history.clear()
    }

    pub fn clear_saved(&self) -> bool {
        self.saved.clear()
    }
}

/// Pick the storage backend named in `config`
pub fn storage_from_config(config: &Config, paths: &PathManager) -> Storage {
    match config.storage.backend {
        StorageBackend::File => {
            let dir = config.storage.resolved_dir(paths);
            if let Err(e) = std::fs::create_dir_all(&dir) {
                warn!(
                    "Storage directory {} is not usable ({}), continuing without persistence",
                    dir.display(),
                    e
                );
                return Storage::unavailable();
            }
            info!("Using file storage at {}", dir.display());
            Storage::new(FileStore::new(dir))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; nothing will persist");
            Storage::new(MemoryStore::new())
        }
        StorageBackend::Disabled => {
            info!("Storage disabled");
            Storage::unavailable()
        }
    }
}
