//! ThemeState - Light/Dark Preference
//!
//! Initial mode: the stored preference, else the environment hint, else light.
//! Every toggle writes the new mode under the `theme` key.

use crate::constants::THEME_PREFERENCE_KEY;
use crate::error::Result;
use crate::theme::colors::{Palette, PortalColors};
use crate::theme::{SystemAppearance, ThemeMode};
use crate::utils::config_store::PreferenceStore;

/// Something that visibly reflects the theme
pub trait ThemeTarget {
    fn apply_theme(&mut self, mode: ThemeMode);
}

/// Pick the initial mode
pub fn resolve_initial_theme(stored: Option<&str>, hint: SystemAppearance) -> ThemeMode {
    stored
        .and_then(ThemeMode::parse)
        .or_else(|| hint.preferred_mode())
        .unwrap_or_default()
}

pub struct ThemeState<P> {
    store: P,
    mode: ThemeMode,
    applied: Option<ThemeMode>,
}

impl<P: PreferenceStore> ThemeState<P> {
    /// Read the stored preference; an unreadable store counts as empty
    pub fn load(store: P, hint: SystemAppearance) -> Self {
        let stored = store.get(THEME_PREFERENCE_KEY).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "theme preference unreadable");
            None
        });
        let mode = resolve_initial_theme(stored.as_deref(), hint);
        tracing::debug!(%mode, ?hint, "theme initialized");
        Self {
            store,
            mode,
            applied: None,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn palette(&self) -> Palette {
        PortalColors::palette(self.mode)
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Flip the mode and persist it
    ///
    /// The in-memory mode flips even when the write fails; the error is
    /// returned so the caller can surface it.
    pub fn toggle(&mut self) -> Result<ThemeMode> {
        self.mode = self.mode.toggled();
        self.store.set(THEME_PREFERENCE_KEY, self.mode.as_str())?;
        Ok(self.mode)
    }

    /// Push the mode to `target` unless it already shows it
    pub fn apply<T: ThemeTarget>(&mut self, target: &mut T) -> bool {
        if self.applied == Some(self.mode) {
            return false;
        }
        target.apply_theme(self.mode);
        self.applied = Some(self.mode);
        true
    }
}
