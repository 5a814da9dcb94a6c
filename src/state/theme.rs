//! Theme preference resolution.
//!
//! DESIGN
//! ======
//! The stored mode is the only persisted value. The effective light/dark
//! theme is derived on demand from that mode and the OS color-scheme signal,
//! so an `auto` user follows OS changes without any write. Storing `auto`
//! removes the key outright; a stale override can never shadow the OS.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::{DARK_THEME_COLOR, LIGHT_THEME_COLOR, THEME_STORAGE_KEY};
use crate::env::{ColorSchemeSignal, PreferenceStore};
use crate::error::BehaviorError;

/// User-selected theme mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the OS color-scheme preference.
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Next mode in the Auto -> Light -> Dark rotation.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Auto => Self::Light,
            Self::Light => Self::Dark,
            Self::Dark => Self::Auto,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = BehaviorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(BehaviorError::UnknownThemeMode(other.to_owned())),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme actually applied to the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Value for `<meta name="theme-color">`.
    #[must_use]
    pub fn meta_color(self) -> &'static str {
        match self {
            Self::Light => LIGHT_THEME_COLOR,
            Self::Dark => DARK_THEME_COLOR,
        }
    }
}

/// Payload of the `themechange` notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeChange {
    pub theme: Theme,
    pub mode: ThemeMode,
}

impl ThemeChange {
    /// JSON form used as the custom event detail.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"theme":"{}","mode":"{}"}}"#, self.theme.as_str(), self.mode.as_str())
        })
    }
}

/// Resolves and persists the theme preference.
pub struct ThemeService<S, C> {
    store: S,
    scheme: C,
    mode: ThemeMode,
}

impl<S: PreferenceStore, C: ColorSchemeSignal> ThemeService<S, C> {
    /// Load the stored mode. Unreadable or unknown values fall back to `Auto`.
    pub fn new(store: S, scheme: C) -> Self {
        let mode = read_mode(&store);
        Self { store, scheme, mode }
    }

    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    #[must_use]
    pub fn effective(&self) -> Theme {
        match self.mode {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Auto => self.system_theme(),
        }
    }

    #[must_use]
    pub fn system_theme(&self) -> Theme {
        if self.scheme.prefers_dark() { Theme::Dark } else { Theme::Light }
    }

    /// The change to apply for the current state.
    #[must_use]
    pub fn current(&self) -> ThemeChange {
        ThemeChange { theme: self.effective(), mode: self.mode }
    }

    /// Switch to `mode` and persist it.
    pub fn set_mode(&mut self, mode: ThemeMode) -> ThemeChange {
        self.mode = mode;
        let persisted = match mode {
            ThemeMode::Auto => self.store.remove(THEME_STORAGE_KEY),
            other => self.store.save(THEME_STORAGE_KEY, other.as_str()),
        };
        if let Err(err) = persisted {
            log::debug!("theme: keeping {mode} for this session only: {err}");
        }
        self.current()
    }

    /// Validate and apply a mode name coming from page scripts.
    ///
    /// # Errors
    ///
    /// Returns `BehaviorError::UnknownThemeMode` and leaves state untouched
    /// when `raw` is not `auto`, `light`, or `dark`.
    pub fn set_mode_str(&mut self, raw: &str) -> Result<ThemeChange, BehaviorError> {
        let mode = raw.parse::<ThemeMode>()?;
        Ok(self.set_mode(mode))
    }

    pub fn cycle(&mut self) -> ThemeChange {
        self.set_mode(self.mode.next())
    }

    /// OS color scheme flipped. Only matters while following the OS.
    pub fn on_system_change(&self) -> Option<ThemeChange> {
        (self.mode == ThemeMode::Auto).then(|| self.current())
    }

    /// Another tab wrote `key`. `new_value` of `None` means it was removed.
    pub fn on_storage_change(&mut self, key: Option<&str>, new_value: Option<&str>) -> Option<ThemeChange> {
        if key != Some(THEME_STORAGE_KEY) {
            return None;
        }
        self.mode = new_value.and_then(|v| v.parse().ok()).unwrap_or_default();
        Some(self.current())
    }
}

fn read_mode<S: PreferenceStore>(store: &S) -> ThemeMode {
    match store.load(THEME_STORAGE_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
            log::debug!("theme: ignoring stored value: {err}");
            ThemeMode::Auto
        }),
        Ok(None) => ThemeMode::Auto,
        Err(err) => {
            log::debug!("theme: {err}");
            ThemeMode::Auto
        }
    }
}
