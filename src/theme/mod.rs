//! Theme - Appearance Modes and Colors

pub mod colors;

use serde::{Deserialize, Serialize};

const LIGHT_THEME_MODE: &str = "light";
const DARK_THEME_MODE: &str = "dark";

/// Display theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Parse the stored literal; anything but "light"/"dark" is rejected
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            LIGHT_THEME_MODE => Some(ThemeMode::Light),
            DARK_THEME_MODE => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Stored literal
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => LIGHT_THEME_MODE,
            ThemeMode::Dark => DARK_THEME_MODE,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Label of the settings menu item switching away from this mode
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Dark mode",
            ThemeMode::Dark => "Light mode",
        }
    }

    /// Icon of the settings menu item
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            ThemeMode::Light => "moon",
            ThemeMode::Dark => "sun",
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light/dark hint from the operating environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemAppearance {
    Light,
    Dark,
    #[default]
    Unknown,
}

impl SystemAppearance {
    pub fn preferred_mode(&self) -> Option<ThemeMode> {
        match self {
            SystemAppearance::Light => Some(ThemeMode::Light),
            SystemAppearance::Dark => Some(ThemeMode::Dark),
            SystemAppearance::Unknown => None,
        }
    }
}
