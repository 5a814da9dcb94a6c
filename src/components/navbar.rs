//! Keeps the offcanvas navigation's active link in sync with the URL.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlAnchorElement};

use crate::config::{NAV_LINK_SELECTOR, NAV_PANEL_ID};
use crate::state::nav::{self, NavLink, NavUpdate, RouteTable};
use crate::util::listener::Listener;
use crate::util::{bootstrap, dom};

pub struct Navbar {
    listeners: Vec<Listener>,
}

impl Navbar {
    /// Highlight the current route and wire link clicks and `popstate`.
    pub fn init(table: RouteTable) -> Self {
        let table = Rc::new(table);
        sync_from_location(&table);

        let mut listeners = Vec::new();
        let elements = dom::query_document(NAV_LINK_SELECTOR);
        let links = snapshot(&elements);
        for (index, (element, link)) in elements.iter().zip(&links).enumerate() {
            if link.is_logout() {
                continue;
            }
            let rendered = links.clone();
            match Listener::new(element, "click", move |_| on_link_click(&rendered, index)) {
                Ok(listener) => listeners.push(listener),
                Err(err) => log::warn!("nav: {err}"),
            }
        }

        if let Ok(window) = dom::window() {
            let table = Rc::clone(&table);
            match Listener::new(&window, "popstate", move |_| sync_from_location(&table)) {
                Ok(listener) => listeners.push(listener),
                Err(err) => log::warn!("nav: {err}"),
            }
        }
        log::debug!("nav: mounted with {} links", elements.len());
        Self { listeners }
    }

    pub fn teardown(&mut self) {
        for listener in &mut self.listeners {
            listener.detach();
        }
        self.listeners.clear();
    }
}

fn snapshot(elements: &[Element]) -> Vec<NavLink> {
    elements
        .iter()
        .map(|el| {
            let path = el
                .dyn_ref::<HtmlAnchorElement>()
                .map(HtmlAnchorElement::pathname)
                .unwrap_or_default();
            NavLink::new(Some(el.id().as_str()), &path)
        })
        .collect()
}

fn current_path() -> Option<String> {
    let location = dom::window().ok()?.location();
    location.pathname().ok()
}

/// Resolve from the URL; used on load and on back/forward navigation.
fn sync_from_location(table: &RouteTable) {
    let Some(path) = current_path() else {
        return;
    };
    let elements = dom::query_document(NAV_LINK_SELECTOR);
    let update = table.resolve(&path, &snapshot(&elements));
    apply(&elements, update);
}

fn on_link_click(links: &[NavLink], index: usize) {
    let Some(outcome) = nav::on_click(links, index) else {
        return;
    };
    apply(&dom::query_document(NAV_LINK_SELECTOR), outcome.update);
    if outcome.close_panel {
        close_panel();
    }
}

fn apply(elements: &[Element], update: NavUpdate) {
    if update == NavUpdate::Unchanged {
        return;
    }
    for el in elements {
        dom::set_class(el, "active", false);
        dom::remove_attr(el, "aria-current");
    }
    if let NavUpdate::Activate(index) = update {
        match elements.get(index) {
            Some(el) => {
                dom::set_class(el, "active", true);
                dom::set_attr(el, "aria-current", "page");
            }
            None => log::debug!("nav: link {index} vanished before activation"),
        }
    }
}

fn close_panel() {
    let Some(panel) = dom::document().ok().and_then(|doc| doc.get_element_by_id(NAV_PANEL_ID)) else {
        return;
    };
    if let Err(err) = bootstrap::hide_offcanvas(&panel) {
        log::warn!("nav: closing panel failed: {err}");
    }
}
