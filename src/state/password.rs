//! Password field show/hide state.
//!
//! The field's own `type` attribute is the only state; `toggle` maps it to
//! the next type plus the icon and label that describe the following action.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

pub const SHOW_LABEL: &str = "Show password";
pub const HIDE_LABEL: &str = "Hide password";
pub const SHOW_ICON: &str = "bi bi-eye";
pub const HIDE_ICON: &str = "bi bi-eye-slash";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMode {
    Masked,
    Plain,
}

impl FieldMode {
    #[must_use]
    pub fn from_input_type(input_type: &str) -> Self {
        if input_type.eq_ignore_ascii_case("password") { Self::Masked } else { Self::Plain }
    }

    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Masked => "password",
            Self::Plain => "text",
        }
    }
}

/// Icon and accessible label for the toggle button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleView {
    pub icon_class: &'static str,
    pub label: &'static str,
}

impl ToggleView {
    /// View for a field currently in `mode`.
    #[must_use]
    pub fn for_mode(mode: FieldMode) -> Self {
        match mode {
            FieldMode::Masked => Self { icon_class: SHOW_ICON, label: SHOW_LABEL },
            FieldMode::Plain => Self { icon_class: HIDE_ICON, label: HIDE_LABEL },
        }
    }
}

/// Flip `current` and describe the button for the new mode.
#[must_use]
pub fn toggle(current: FieldMode) -> (FieldMode, ToggleView) {
    let next = match current {
        FieldMode::Masked => FieldMode::Plain,
        FieldMode::Plain => FieldMode::Masked,
    };
    (next, ToggleView::for_mode(next))
}
