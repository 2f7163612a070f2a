pub mod browse;
pub mod clear;
pub mod config;
pub mod list;
pub mod render;
pub mod watch;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::PathBuf;
use viewstate_config::{Config, PathManager, StorageBackend};
use viewstate_core::ViewingState;

/// Everything a command needs before it touches viewing state
pub struct Context {
    pub paths: PathManager,
    pub config: Config,
    pub config_path: PathBuf,
    pub ephemeral: bool,
}

impl Context {
    pub fn load(config_override: Option<PathBuf>, ephemeral: bool) -> Result<Self> {
        let paths = PathManager::default();

        let config_path = config_override.unwrap_or_else(|| paths.config_file());
        let mut config = Config::load_or_default(&config_path)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
        if ephemeral {
            config.storage.backend = StorageBackend::Memory;
            config.storage.dir = None;
        }

        Ok(Self {
            paths,
            config,
            config_path,
            ephemeral,
        })
    }

    pub fn open_state(&self) -> Result<ViewingState> {
        let state = ViewingState::from_config(&self.config, &self.paths)
            .map_err(|e| eyre!("{:#}", e))?;

        let rejected = state.catalog().rejected().len();
        if rejected > 0 {
            tracing::warn!("{} catalog records were skipped; run with -v for details", rejected);
        }
        Ok(state)
    }
}

/// Refuse ids the catalog does not know, so the stores only ever receive
/// titles the viewer could actually have picked.
pub fn require_in_catalog<'a>(state: &'a ViewingState, content_id: &str) -> Result<&'a viewstate_models::CatalogItem> {
    state
        .catalog()
        .get(content_id)
        .ok_or_else(|| eyre!("No title with content id {:?} in the catalog", content_id))
}
