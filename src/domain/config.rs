//! Config - Portal Configuration

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::theme::SystemAppearance;

/// Main portal configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PortalConfig {
    /// Hosted backend connection
    pub backend: BackendConfig,
    /// Table defaults
    pub table: TableConfig,
    /// Log output
    pub logging: LoggingConfig,
    /// Appearance hint
    pub appearance: AppearanceConfig,
}

/// Hosted backend connection
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BackendConfig {
    /// Service URL
    pub url: String,
    /// Public (anonymous) API key
    pub anon_key: Option<String>,
}

/// Table configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page
    pub page_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Directory for daily log files; console only when unset
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Appearance configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Environment light/dark hint
    pub hint: SystemAppearance,
}

impl PortalConfig {
    /// Page size, never zero
    pub fn page_size(&self) -> usize {
        self.table.page_size.max(1)
    }
}
