//! Compiled-in configuration: storage keys, selectors, colors, and timings.
//!
//! Markup-facing names (selectors, data attributes) must stay in sync with the
//! server-rendered templates.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

// =============================================================================
// THEME
// =============================================================================

/// `localStorage` key holding an explicit theme override.
pub const THEME_STORAGE_KEY: &str = "theme_preference";
/// Attribute set on `<html>` to select Bootstrap's dark palette.
pub const THEME_ATTRIBUTE: &str = "data-bs-theme";
/// Custom event dispatched on `window` after every theme application.
pub const THEME_CHANGE_EVENT: &str = "themechange";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
pub const LIGHT_THEME_COLOR: &str = "#248939";
pub const DARK_THEME_COLOR: &str = "#1e2d2f";

// =============================================================================
// NAVIGATION
// =============================================================================

pub const NAV_LINK_SELECTOR: &str = ".offcanvas .nav-pills .nav-link";
pub const NAV_PANEL_ID: &str = "offcanvasNavbar";
pub const LOGOUT_PATH: &str = "/logout";
pub const HOME_LINK_ID: &str = "home-link";

/// Path to link-id mapping for the rendered navigation.
pub const ROUTES: &[(&str, &str)] = &[
    ("/", HOME_LINK_ID),
    ("/home", HOME_LINK_ID),
    ("/settings", "settings-link"),
    ("/staff", "staff-link"),
    ("/schedule", "schedule-link"),
    ("/layouts", "layouts-link"),
    ("/tasks", "tasks-link"),
    ("/invox", "invox-link"),
];

// =============================================================================
// ALERTS / PASSWORD
// =============================================================================

pub const ALERT_DISMISS_DELAY_MS: u32 = 7_500;
pub const ALERT_SELECTOR: &str = ".alert";
pub const PASSWORD_TOGGLE_ATTR: &str = "data-password-toggle";

// =============================================================================
// PULL TO REFRESH
// =============================================================================

pub const PULL_CONTAINER_ATTR: &str = "data-pull-to-refresh";
pub const PULL_INITIALIZED_ATTR: &str = "data-pull-to-refresh-initialized";
pub const DEFAULT_PULL_THRESHOLD: f64 = 110.0;
pub const DEFAULT_PULL_RESISTANCE: f64 = 2.5;
pub const DEFAULT_MIN_SPINNER_MS: u32 = 800;
pub const DEFAULT_SETTLE_MS: u32 = 200;
/// Pull distance below which the indicator stays hidden.
pub const PULL_INDICATOR_DEADBAND: f64 = 10.0;

/// Tunables for one pull-to-refresh controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullOptions {
    /// Damped distance at which a release triggers a refresh.
    pub threshold: f64,
    /// Divisor applied to the raw pointer displacement.
    pub resistance: f64,
    /// Minimum time the loading indicator stays up before the action runs.
    pub min_spinner_ms: u32,
    /// Delay between the action settling and the visual reset.
    pub settle_ms: u32,
}

impl Default for PullOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PULL_THRESHOLD,
            resistance: DEFAULT_PULL_RESISTANCE,
            min_spinner_ms: DEFAULT_MIN_SPINNER_MS,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

impl PullOptions {
    /// Build options from a container's `data-threshold` / `data-resistance`
    /// attribute values. Missing, unparsable, or non-positive values keep the
    /// defaults.
    #[must_use]
    pub fn from_dataset(threshold: Option<&str>, resistance: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            threshold: parse_positive(threshold).unwrap_or(defaults.threshold),
            resistance: parse_positive(resistance).unwrap_or(defaults.resistance),
            ..defaults
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}
