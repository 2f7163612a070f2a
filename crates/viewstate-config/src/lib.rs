pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, HistoryConfig, LoggingConfig, StorageBackend, StorageConfig, DEFAULT_HISTORY_CAPACITY};
pub use paths::{PathManager, base_path_override};
