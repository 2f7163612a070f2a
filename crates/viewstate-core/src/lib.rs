pub mod catalog;
pub mod clock;
pub mod composer;
pub mod error;
pub mod history;
pub mod saved_list;
pub mod search;
pub mod state;
pub mod storage;

pub use catalog::{CatalogIndex, RejectedRecord};
pub use clock::{Clock, ManualClock, SystemClock};
pub use composer::ViewComposer;
pub use error::{CatalogError, RecordError, StorageError};
pub use history::{HistoryStore, WATCH_HISTORY_KEY};
pub use saved_list::{SavedList, WATCHLIST_KEY};
pub use state::{storage_from_config, ViewingState};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Storage};

/// Trim a content identifier, rejecting empty input.
///
/// Every mutator and lookup goes through this so that `""` and `"  "` are
/// treated as no-ops rather than stored.
pub(crate) fn normalize_id(content_id: &str) -> Option<&str> {
    let trimmed = content_id.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
