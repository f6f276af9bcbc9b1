//! ConfigStore - Local Configuration and Preference Storage

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::constants::{CONFIG_FILE_NAME, CONFIG_PATH_ENV, PREFERENCES_FILE_NAME};
use crate::domain::config::PortalConfig;
use crate::error::Result;
use crate::helpers::fs::get_or_create_config_dir;

/// Load a TOML file; a missing or blank file yields the default
pub fn load_toml<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(toml::from_str(&content)?)
}

/// Save a TOML file, creating parent directories
pub fn save_toml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(value)?)?;
    Ok(())
}

/// Config file location: `$PORTAL_CONFIG`, else the config directory
pub fn config_path() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME)),
    }
}

/// Load the portal config from its default location
pub fn load_config() -> Result<PortalConfig> {
    let path = config_path()?;
    let config = load_toml(&path)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

pub fn save_config(config: &PortalConfig) -> Result<()> {
    save_toml(&config_path()?, config)
}

// ==================== Preferences ====================

/// Durable string key/value storage for user preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences in a TOML file
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `preferences.toml` in the config directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(get_or_create_config_dir()?.join(PREFERENCES_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        load_toml(&self.path)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        save_toml(&self.path, &values)
    }
}

/// Preferences kept in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
