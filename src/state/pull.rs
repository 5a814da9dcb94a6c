//! Pull-to-refresh gesture state machine.
//!
//! Pointer events (touch or mouse, already reduced to a vertical coordinate)
//! go through [`PullController::dispatch`] together with a [`Surface`]
//! snapshot of the page. The controller returns [`PullEffect`]s for the host
//! to perform; it never touches the DOM itself.
//!
//! ```text
//! Idle --down@top--> Tracking --move(+dy)@top--> Pulling --up--> Refreshing
//!  ^                    |                           |               |
//!  +------up/scroll-----+--------up<threshold-------+---finish------+
//! ```

#[cfg(test)]
#[path = "pull_test.rs"]
mod pull_test;

use crate::config::{PULL_INDICATOR_DEADBAND, PullOptions};

pub const PULL_MESSAGE: &str = "Pull down to refresh";
pub const READY_MESSAGE: &str = "Release to refresh";
pub const REFRESHING_MESSAGE: &str = "Refreshing...";

/// Gesture phase.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PullPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pointer is down at the top edge but has not moved downward yet.
    Tracking {
        /// Pointer y at pointer-down.
        start_y: f64,
    },
    /// Pointer has moved downward; the content follows.
    Pulling {
        /// Pointer y at pointer-down.
        start_y: f64,
        /// Damped distance, `(y - start_y) / resistance`.
        distance: f64,
    },
    /// Refresh action in flight; all pointer input is ignored.
    Refreshing,
}

/// Pointer and scroll input, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PullEvent {
    PointerDown { y: f64 },
    PointerMove { y: f64 },
    PointerUp,
    Scroll,
}

/// Page facts sampled by the host when an event arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Surface {
    /// Both the window and the container are scrolled to their top edge.
    pub at_top: bool,
    /// A modal dialog is open.
    pub modal_open: bool,
}

impl Surface {
    #[must_use]
    pub fn at_top() -> Self {
        Self { at_top: true, modal_open: false }
    }

    #[must_use]
    pub fn scrolled() -> Self {
        Self { at_top: false, modal_open: false }
    }
}

/// Indicator and content presentation for a given distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullVisual {
    pub visible: bool,
    pub ready: bool,
    /// Content translation in pixels, capped at the threshold.
    pub offset: f64,
    /// Arrow rotation in degrees, 0..=180.
    pub arrow_rotation: f64,
    pub message: &'static str,
}

impl PullVisual {
    #[must_use]
    pub fn for_distance(distance: f64, threshold: f64) -> Self {
        let ready = distance >= threshold;
        Self {
            visible: distance > PULL_INDICATOR_DEADBAND,
            ready,
            offset: distance.min(threshold),
            arrow_rotation: (distance / threshold).min(1.0) * 180.0,
            message: if ready { READY_MESSAGE } else { PULL_MESSAGE },
        }
    }
}

/// Work for the host to perform, in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PullEffect {
    /// Suppress the browser's native scroll/overscroll for this event.
    PreventDefault,
    Render(PullVisual),
    /// Notify the `on_pull` observer.
    Pulled(f64),
    /// Notify the `on_release` observer.
    Released(f64),
    /// Show the loading state and start the refresh cycle.
    BeginRefresh,
    /// Return indicator, message, and content to rest.
    Reset,
    /// Detach listeners and restore the container markup.
    Teardown,
}

/// One pull-to-refresh controller.
#[derive(Clone, Debug)]
pub struct PullController {
    options: PullOptions,
    phase: PullPhase,
    enabled: bool,
    destroyed: bool,
}

impl PullController {
    #[must_use]
    pub fn new(options: PullOptions) -> Self {
        Self { options, phase: PullPhase::Idle, enabled: true, destroyed: false }
    }

    #[must_use]
    pub fn options(&self) -> PullOptions {
        self.options
    }

    #[must_use]
    pub fn phase(&self) -> PullPhase {
        self.phase
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.destroyed
    }

    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.phase == PullPhase::Refreshing
    }

    /// Current damped pull distance; zero unless pulling.
    #[must_use]
    pub fn distance(&self) -> f64 {
        match self.phase {
            PullPhase::Pulling { distance, .. } => distance,
            _ => 0.0,
        }
    }

    /// Presentation while the refresh action runs.
    #[must_use]
    pub fn refreshing_visual(&self) -> PullVisual {
        PullVisual {
            visible: true,
            ready: false,
            offset: self.options.threshold,
            arrow_rotation: 0.0,
            message: REFRESHING_MESSAGE,
        }
    }

    /// Feed one event through the state machine.
    pub fn dispatch(&mut self, event: PullEvent, surface: Surface) -> Vec<PullEffect> {
        if !self.is_enabled() || self.is_refreshing() {
            return Vec::new();
        }
        match event {
            PullEvent::PointerDown { y } => self.pointer_down(y, surface),
            PullEvent::PointerMove { y } => self.pointer_move(y, surface),
            PullEvent::PointerUp => self.pointer_up(),
            PullEvent::Scroll => self.scroll(surface),
        }
    }

    fn pointer_down(&mut self, y: f64, surface: Surface) -> Vec<PullEffect> {
        if surface.modal_open || !surface.at_top || self.phase != PullPhase::Idle {
            return Vec::new();
        }
        self.phase = PullPhase::Tracking { start_y: y };
        Vec::new()
    }

    fn pointer_move(&mut self, y: f64, surface: Surface) -> Vec<PullEffect> {
        if surface.modal_open || !surface.at_top {
            return Vec::new();
        }
        let start_y = match self.phase {
            PullPhase::Tracking { start_y } | PullPhase::Pulling { start_y, .. } => start_y,
            PullPhase::Idle | PullPhase::Refreshing => return Vec::new(),
        };
        let delta = y - start_y;
        if delta <= 0.0 {
            return Vec::new();
        }
        let distance = delta / self.options.resistance;
        self.phase = PullPhase::Pulling { start_y, distance };
        vec![
            PullEffect::PreventDefault,
            PullEffect::Render(PullVisual::for_distance(distance, self.options.threshold)),
            PullEffect::Pulled(distance),
        ]
    }

    fn pointer_up(&mut self) -> Vec<PullEffect> {
        match self.phase {
            PullPhase::Pulling { distance, .. } if distance >= self.options.threshold => {
                self.phase = PullPhase::Refreshing;
                vec![PullEffect::Released(distance), PullEffect::BeginRefresh]
            }
            PullPhase::Pulling { distance, .. } => {
                self.phase = PullPhase::Idle;
                vec![PullEffect::Reset, PullEffect::Released(distance)]
            }
            PullPhase::Tracking { .. } => {
                self.phase = PullPhase::Idle;
                Vec::new()
            }
            PullPhase::Idle | PullPhase::Refreshing => Vec::new(),
        }
    }

    fn scroll(&mut self, surface: Surface) -> Vec<PullEffect> {
        if surface.at_top {
            return Vec::new();
        }
        match self.phase {
            PullPhase::Tracking { .. } => {
                self.phase = PullPhase::Idle;
                Vec::new()
            }
            PullPhase::Pulling { distance, .. } if distance < self.options.threshold => {
                self.phase = PullPhase::Idle;
                vec![PullEffect::Reset]
            }
            _ => Vec::new(),
        }
    }

    /// The refresh cycle settled.
    pub fn finish_refresh(&mut self) -> Vec<PullEffect> {
        if !self.is_refreshing() {
            return Vec::new();
        }
        self.phase = PullPhase::Idle;
        if self.destroyed { Vec::new() } else { vec![PullEffect::Reset] }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Suspend input. A tracked pull is dropped; an in-flight refresh is not.
    pub fn disable(&mut self) -> Vec<PullEffect> {
        self.enabled = false;
        match self.phase {
            PullPhase::Tracking { .. } | PullPhase::Pulling { .. } => {
                self.phase = PullPhase::Idle;
                vec![PullEffect::Reset]
            }
            PullPhase::Idle if !self.destroyed => vec![PullEffect::Reset],
            _ => Vec::new(),
        }
    }

    /// Stop for good. Only the first call asks for teardown.
    pub fn destroy(&mut self) -> Vec<PullEffect> {
        if self.destroyed {
            return Vec::new();
        }
        self.destroyed = true;
        if !self.is_refreshing() {
            self.phase = PullPhase::Idle;
        }
        vec![PullEffect::Teardown]
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
