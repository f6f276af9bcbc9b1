//! File System Utilities
//!
//! Configuration and data directory management.

use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "rsquare", APP_NAME).ok_or_else(|| Error::Config {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/request-portal/` or `$XDG_CONFIG_HOME/request-portal/`
/// - **macOS**: `~/Library/Application Support/com.rsquare.request-portal/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\rsquare\request-portal\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let config_dir = dirs.config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }
    Ok(config_dir.to_path_buf())
}
