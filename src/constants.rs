//! Portal Constants
//!
//! Centralized constants shared by the table engine, the access model and the
//! feature controllers.

/// Application name used for config/data directories and log files
pub const APP_NAME: &str = "request-portal";

/// Default rows per table page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default message rendered by an empty table
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// Default search input placeholder
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search...";

/// Preference key holding the theme
pub const THEME_PREFERENCE_KEY: &str = "theme";

/// Number of requests listed on the dashboard
pub const RECENT_REQUESTS_LIMIT: usize = 6;

/// Minimum password length accepted by the reset form
pub const MIN_PASSWORD_LEN: usize = 6;

/// Display name when neither profile nor session carries one
pub const FALLBACK_DISPLAY_NAME: &str = "User";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "request-portal.toml";

/// Preferences file name inside the config directory
pub const PREFERENCES_FILE_NAME: &str = "preferences.toml";

/// Environment variable overriding the config file path
pub const CONFIG_PATH_ENV: &str = "PORTAL_CONFIG";
