//! Which alert banners the auto-dismiss timer may close.

#[cfg(test)]
#[path = "alerts_test.rs"]
mod alerts_test;

/// Close-affordance facts gathered from one `.alert` element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlertSnapshot {
    /// Element carries `.alert-dismissible`.
    pub dismissible_class: bool,
    /// Element contains a `.btn-close` or `[data-bs-dismiss="alert"]` control.
    pub has_close_control: bool,
}

impl AlertSnapshot {
    /// Alerts without a user-facing close affordance are permanent.
    #[must_use]
    pub fn auto_dismiss(self) -> bool {
        self.dismissible_class || self.has_close_control
    }
}

/// Indices of the alerts to close.
#[must_use]
pub fn dismissible(alerts: &[AlertSnapshot]) -> Vec<usize> {
    alerts
        .iter()
        .enumerate()
        .filter(|(_, alert)| alert.auto_dismiss())
        .map(|(i, _)| i)
        .collect()
}
