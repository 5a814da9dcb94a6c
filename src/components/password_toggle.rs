//! Show/hide buttons for password fields.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::config::PASSWORD_TOGGLE_ATTR;
use crate::error::BehaviorError;
use crate::state::password::{self, FieldMode, ToggleView};
use crate::util::dom;
use crate::util::listener::Listener;

pub struct PasswordToggles {
    listeners: Vec<Listener>,
}

impl PasswordToggles {
    /// Label every `[data-password-toggle]` button and wire the ones whose
    /// attribute names a field id.
    pub fn init() -> Self {
        let mut listeners = Vec::new();
        for button in dom::query_document(&format!("[{PASSWORD_TOGGLE_ATTR}]")) {
            set_label(&button, ToggleView::for_mode(FieldMode::Masked));
            let Some(field_id) = button.get_attribute(PASSWORD_TOGGLE_ATTR).filter(|id| !id.is_empty()) else {
                continue;
            };
            let target = button.clone();
            match Listener::new(&button, "click", move |_| {
                if let Err(err) = toggle(&field_id, &target) {
                    log::warn!("password toggle: {err}");
                }
            }) {
                Ok(listener) => listeners.push(listener),
                Err(err) => log::warn!("password toggle: {err}"),
            }
        }
        Self { listeners }
    }

    pub fn teardown(&mut self) {
        for listener in &mut self.listeners {
            listener.detach();
        }
        self.listeners.clear();
    }
}

/// Flip the field `field_id` and relabel `button`.
///
/// # Errors
///
/// Returns `BehaviorError::MissingElement` if the field is absent or not an input.
pub fn toggle(field_id: &str, button: &Element) -> Result<FieldMode, BehaviorError> {
    let input: HtmlInputElement = dom::document()?
        .get_element_by_id(field_id)
        .and_then(|el| el.dyn_into().ok())
        .ok_or_else(|| BehaviorError::MissingElement(format!("#{field_id}")))?;
    let (mode, view) = password::toggle(FieldMode::from_input_type(&input.type_()));
    input.set_type(mode.input_type());
    set_label(button, view);
    Ok(mode)
}

fn set_label(button: &Element, view: ToggleView) {
    match dom::query_one(button, "i") {
        Some(icon) => icon.set_class_name(view.icon_class),
        None => log::debug!("password toggle: button has no icon"),
    }
    dom::set_attr(button, "title", view.label);
    dom::set_attr(button, "aria-label", view.label);
}
