//! Calls into Bootstrap's JavaScript widgets when the page loaded them.
//!
//! Bootstrap is an optional collaborator: every call reports whether a
//! widget method actually ran so callers can fall back to plain DOM edits.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use crate::error::BehaviorError;

/// `window.bootstrap.<widget>` if present.
fn widget_class(widget: &str) -> Option<JsValue> {
    let bootstrap = Reflect::get(&js_sys::global(), &JsValue::from_str("bootstrap")).ok()?;
    if bootstrap.is_undefined() || bootstrap.is_null() {
        return None;
    }
    let class = Reflect::get(&bootstrap, &JsValue::from_str(widget)).ok()?;
    (!class.is_undefined() && !class.is_null()).then_some(class)
}

/// Call a static `lookup` (`getInstance` / `getOrCreateInstance`) and then
/// `method` on the returned instance.
fn call_on_instance(widget: &str, lookup: &str, el: &Element, method: &str) -> Result<bool, BehaviorError> {
    let Some(class) = widget_class(widget) else {
        return Ok(false);
    };
    let lookup_fn: Function = Reflect::get(&class, &JsValue::from_str(lookup))
        .map_err(|err| BehaviorError::js(&err))?
        .dyn_into()
        .map_err(|err| BehaviorError::js(&err))?;
    let instance = lookup_fn.call1(&class, el).map_err(|err| BehaviorError::js(&err))?;
    if instance.is_null() || instance.is_undefined() {
        return Ok(false);
    }
    let method_fn: Function = Reflect::get(&instance, &JsValue::from_str(method))
        .map_err(|err| BehaviorError::js(&err))?
        .dyn_into()
        .map_err(|err| BehaviorError::js(&err))?;
    method_fn.call0(&instance).map_err(|err| BehaviorError::js(&err))?;
    Ok(true)
}

/// Close an alert through `bootstrap.Alert`.
///
/// # Errors
///
/// Returns `BehaviorError::Js` if Bootstrap is present but throws.
pub fn close_alert(el: &Element) -> Result<bool, BehaviorError> {
    call_on_instance("Alert", "getOrCreateInstance", el, "close")
}

/// Hide an open offcanvas panel. Panels never opened have no instance.
///
/// # Errors
///
/// Returns `BehaviorError::Js` if Bootstrap is present but throws.
pub fn hide_offcanvas(el: &Element) -> Result<bool, BehaviorError> {
    call_on_instance("Offcanvas", "getInstance", el, "hide")
}
