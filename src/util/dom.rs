//! Small `web_sys` helpers for querying and mutating the document.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::BehaviorError;

/// The page's `window`.
///
/// # Errors
///
/// Returns `BehaviorError::MissingElement` outside a window context.
pub fn window() -> Result<Window, BehaviorError> {
    web_sys::window().ok_or_else(|| BehaviorError::MissingElement("window".into()))
}

/// The page's `document`.
///
/// # Errors
///
/// Returns `BehaviorError::MissingElement` outside a document context.
pub fn document() -> Result<Document, BehaviorError> {
    window()?.document().ok_or_else(|| BehaviorError::MissingElement("document".into()))
}

/// Every element under `root` matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::warn!("dom: invalid selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Every element in the document matching `selector`.
pub fn query_document(selector: &str) -> Vec<Element> {
    match document().map(|doc| doc.document_element()) {
        Ok(Some(root)) => query_all(&root, selector),
        _ => Vec::new(),
    }
}

/// First element under `root` matching `selector`.
pub fn query_one(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).unwrap_or_default()
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let classes = el.class_list();
    let result = if on { classes.add_1(class) } else { classes.remove_1(class) };
    if let Err(err) = result {
        log::debug!("dom: class {class}: {}", BehaviorError::js(&err));
    }
}

pub fn set_attr(el: &Element, name: &str, value: &str) {
    if let Err(err) = el.set_attribute(name, value) {
        log::debug!("dom: attribute {name}: {}", BehaviorError::js(&err));
    }
}

pub fn remove_attr(el: &Element, name: &str) {
    if let Err(err) = el.remove_attribute(name) {
        log::debug!("dom: attribute {name}: {}", BehaviorError::js(&err));
    }
}

/// Set one inline style property on an element.
pub fn set_style(el: &Element, property: &str, value: &str) {
    let Some(html) = el.dyn_ref::<HtmlElement>() else {
        return;
    };
    if let Err(err) = html.style().set_property(property, value) {
        log::debug!("dom: style {property}: {}", BehaviorError::js(&err));
    }
}

/// Create an element with a class name.
///
/// # Errors
///
/// Returns `BehaviorError::Js` if the document refuses to create the tag.
pub fn create(doc: &Document, tag: &str, class: &str) -> Result<Element, BehaviorError> {
    let el = doc.create_element(tag).map_err(|err| BehaviorError::js(&err))?;
    el.set_class_name(class);
    Ok(el)
}

/// Whether the window is scrolled to the top edge.
pub fn window_at_top() -> bool {
    let Ok(win) = window() else {
        return true;
    };
    let scroll_y = win.scroll_y().unwrap_or(0.0);
    let doc_top = win
        .document()
        .and_then(|doc| doc.document_element())
        .map_or(0, |root| root.scroll_top());
    scroll_y <= 0.0 || doc_top <= 0
}
