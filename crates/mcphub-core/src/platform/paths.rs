//! Per-user path resolution for the local store.

use crate::config::StoreConfig;
use crate::error::{HubError, Result};
use std::path::PathBuf;

/// Get the per-user mcphub configuration directory.
///
/// # Platform Behavior
/// - **Linux**: `~/.config/mcphub` (XDG_CONFIG_HOME)
/// - **Windows**: `%APPDATA%\mcphub`
/// - **macOS**: `~/Library/Application Support/mcphub`
pub fn hub_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| HubError::Config {
        message: "Could not determine platform config directory".to_string(),
    })?;
    Ok(config_dir.join(StoreConfig::APP_DIR_NAME))
}

/// Get the path to the local store database.
///
/// Returns `{hub_config_dir}/hub.db`. The directory is created lazily by
/// the store when it first opens the database.
pub fn store_db_path() -> Result<PathBuf> {
    Ok(hub_config_dir()?.join(StoreConfig::DB_FILENAME))
}
