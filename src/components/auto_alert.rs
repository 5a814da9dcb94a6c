//! Closes dismissible alert banners once, a fixed delay after load.

use gloo_timers::callback::Timeout;
use web_sys::Element;

use crate::config::{ALERT_DISMISS_DELAY_MS, ALERT_SELECTOR};
use crate::state::alerts::{self, AlertSnapshot};
use crate::util::{bootstrap, dom};

/// Start the one-shot dismissal timer. The timer is not cancellable.
pub fn schedule() {
    Timeout::new(ALERT_DISMISS_DELAY_MS, dismiss_now).forget();
}

fn snapshot(el: &Element) -> AlertSnapshot {
    AlertSnapshot {
        dismissible_class: dom::has_class(el, "alert-dismissible"),
        has_close_control: dom::query_one(el, r#".btn-close, [data-bs-dismiss="alert"]"#).is_some(),
    }
}

fn dismiss_now() {
    let elements = dom::query_document(ALERT_SELECTOR);
    let snapshots: Vec<_> = elements.iter().map(snapshot).collect();
    let targets = alerts::dismissible(&snapshots);
    log::debug!("alerts: dismissing {} of {}", targets.len(), elements.len());
    for el in targets.iter().filter_map(|&index| elements.get(index)) {
        match bootstrap::close_alert(el) {
            Ok(true) => {}
            Ok(false) => el.remove(),
            Err(err) => {
                log::warn!("alerts: {err}");
                el.remove();
            }
        }
    }
}
