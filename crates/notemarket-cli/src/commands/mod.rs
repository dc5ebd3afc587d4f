//! CLI command implementations

pub mod auth;
pub mod connectivity;
pub mod notes;
pub mod publish;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use notemarket_api::{ApiClient, MarketplaceProvider};
use notemarket_core::config::Config;

use crate::session::SessionFile;

/// Loads configuration, honoring an explicit `--config` path
pub fn load_config(config_path: Option<&PathBuf>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::load_or_default(&Config::default_path())),
    }
}

/// Builds the backend provider from config and the persisted session
pub fn build_provider(config: &Config) -> Result<Arc<MarketplaceProvider>> {
    let session = Arc::new(SessionFile::new(SessionFile::default_path()));
    let client = ApiClient::new(&config.api, session)?;
    Ok(Arc::new(MarketplaceProvider::new(client)))
}
