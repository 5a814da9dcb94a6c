//! Timed refresh cycle run after a pull crosses the threshold.
//!
//! The loading indicator is held for `min_spinner_ms` before the action
//! runs so even instantaneous actions are perceivable, then the action is
//! awaited to settlement, then `settle_ms` passes before the visual reset.
//! The outcome is reported but never retried: a failed action settles the
//! controller exactly like a successful one.

#[cfg(test)]
#[path = "refresh_test.rs"]
mod refresh_test;

use std::future::Future;

use crate::config::PullOptions;
use crate::env::Clock;
use crate::error::BehaviorError;

/// Run one refresh cycle and return the action's outcome.
///
/// # Errors
///
/// Returns whatever error the action settled with, after the full cycle.
pub async fn run_refresh_cycle<C, F, Fut>(clock: &C, options: PullOptions, action: F) -> Result<(), BehaviorError>
where
    C: Clock,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), BehaviorError>>,
{
    clock.sleep(options.min_spinner_ms).await;
    let outcome = action().await;
    if let Err(err) = &outcome {
        log::warn!("pull-to-refresh: {err}");
    }
    clock.sleep(options.settle_ms).await;
    outcome
}
