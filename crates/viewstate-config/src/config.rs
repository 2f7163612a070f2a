use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::paths::PathManager;

/// Number of plays kept in the watch history unless configured otherwise
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key in the storage directory
    #[default]
    File,
    /// Process-local; nothing survives a restart
    Memory,
    /// No persistence context at all: reads are empty, writes are dropped
    Disabled,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Overrides the default `<data dir>/storage`
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_dir(&self, paths: &PathManager) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| paths.storage_dir())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON array of catalog records; the bundled catalog is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Write logs to a daily-rotated file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Force JSON (`true`) or plain text (`false`); detected from the terminal when unset
    #[serde(default)]
    pub json: Option<bool>,
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config at `path`, or defaults when the file does not exist yet
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.history.capacity == 0 {
            return Err(anyhow::anyhow!("history.capacity must be at least 1"));
        }

        if let Some(dir) = &self.storage.dir {
            if self.storage.backend != StorageBackend::File {
                return Err(anyhow::anyhow!(
                    "storage.dir is set to {} but storage.backend is not \"file\"",
                    dir.display()
                ));
            }
        }

        if let Some(path) = &self.catalog.path {
            if !path.exists() {
                return Err(anyhow::anyhow!("catalog.path {} does not exist", path.display()));
            }
        }

        Ok(())
    }
}
