//! Applies the resolved theme to the document and keeps it current.
//!
//! Subscribes to the OS color-scheme media query and to cross-tab `storage`
//! events; both feed `ThemeService`, and any resulting change is applied to
//! `<html>`, `<meta name="theme-color">`, and broadcast as `themechange`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, HtmlMetaElement, MediaQueryList, StorageEvent};

use crate::config::{DARK_SCHEME_QUERY, THEME_ATTRIBUTE, THEME_CHANGE_EVENT};
use crate::env::{ColorSchemeSignal, PreferenceStore};
use crate::error::BehaviorError;
use crate::state::theme::{Theme, ThemeChange, ThemeMode, ThemeService};
use crate::util::dom;
use crate::util::listener::Listener;
use crate::util::storage::open_preferences;

/// `(prefers-color-scheme: dark)`; reports light when media queries are unavailable.
#[derive(Clone)]
pub struct MediaScheme(Option<MediaQueryList>);

impl MediaScheme {
    fn open() -> Self {
        let query = dom::window().ok().and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten());
        Self(query)
    }
}

impl ColorSchemeSignal for MediaScheme {
    fn prefers_dark(&self) -> bool {
        self.0.as_ref().is_some_and(MediaQueryList::matches)
    }
}

type Service = ThemeService<Rc<dyn PreferenceStore>, MediaScheme>;

pub struct ThemeManager {
    service: Rc<RefCell<Service>>,
    listeners: Vec<Listener>,
}

impl ThemeManager {
    /// Resolve, apply, and subscribe.
    pub fn init() -> Self {
        let scheme = MediaScheme::open();
        let service = Rc::new(RefCell::new(ThemeService::new(open_preferences(), scheme.clone())));
        apply(service.borrow().current());

        let mut listeners = Vec::new();
        if let Some(query) = &scheme.0 {
            let svc = Rc::clone(&service);
            match Listener::new(query, "change", move |_| {
                let change = svc.borrow().on_system_change();
                if let Some(change) = change {
                    apply(change);
                }
            }) {
                Ok(listener) => listeners.push(listener),
                Err(err) => log::warn!("theme: {err}"),
            }
        }
        if let Ok(window) = dom::window() {
            let svc = Rc::clone(&service);
            match Listener::new(&window, "storage", move |event| {
                let Some(event) = event.dyn_ref::<StorageEvent>() else {
                    return;
                };
                let change = svc.borrow_mut().on_storage_change(event.key().as_deref(), event.new_value().as_deref());
                if let Some(change) = change {
                    apply(change);
                }
            }) {
                Ok(listener) => listeners.push(listener),
                Err(err) => log::warn!("theme: {err}"),
            }
        }
        log::debug!("theme: mounted in {} mode", service.borrow().mode());
        Self { service, listeners }
    }

    /// Detach every subscription.
    pub fn teardown(&mut self) {
        for listener in &mut self.listeners {
            listener.detach();
        }
        self.listeners.clear();
    }

    /// # Errors
    ///
    /// Returns `BehaviorError::UnknownThemeMode` for anything but `auto`, `light`, `dark`.
    pub fn set_theme(&self, mode: &str) -> Result<ThemeChange, BehaviorError> {
        let change = self.service.borrow_mut().set_mode_str(mode)?;
        apply(change);
        Ok(change)
    }

    pub fn cycle(&self) -> ThemeChange {
        let change = self.service.borrow_mut().cycle();
        apply(change);
        change
    }

    pub fn mode(&self) -> ThemeMode {
        self.service.borrow().mode()
    }

    pub fn effective(&self) -> Theme {
        self.service.borrow().effective()
    }

    pub fn system_theme(&self) -> Theme {
        self.service.borrow().system_theme()
    }
}

/// Write `change` to the document and notify listeners.
fn apply(change: ThemeChange) {
    let Ok(doc) = dom::document() else {
        return;
    };
    if let Some(root) = doc.document_element() {
        match change.theme {
            Theme::Dark => dom::set_attr(&root, THEME_ATTRIBUTE, "dark"),
            Theme::Light => dom::remove_attr(&root, THEME_ATTRIBUTE),
        }
    }
    if let Err(err) = update_meta_color(&doc, change.theme) {
        log::debug!("theme: {err}");
    }
    if let Err(err) = broadcast(change) {
        log::warn!("theme: {err}");
    }
    log::debug!("theme changed: {}", change.to_json());
}

fn update_meta_color(doc: &web_sys::Document, theme: Theme) -> Result<(), BehaviorError> {
    let existing = doc
        .query_selector(r#"meta[name="theme-color"]"#)
        .map_err(|err| BehaviorError::js(&err))?
        .and_then(|el| el.dyn_into::<HtmlMetaElement>().ok());
    let meta = match existing {
        Some(meta) => meta,
        None => {
            let meta: HtmlMetaElement = doc
                .create_element("meta")
                .map_err(|err| BehaviorError::js(&err))?
                .dyn_into()
                .map_err(|err| BehaviorError::js(&err))?;
            meta.set_name("theme-color");
            let head = doc.head().ok_or_else(|| BehaviorError::MissingElement("head".into()))?;
            head.append_child(&meta).map_err(|err| BehaviorError::js(&err))?;
            meta
        }
    };
    meta.set_content(theme.meta_color());
    Ok(())
}

fn broadcast(change: ThemeChange) -> Result<(), BehaviorError> {
    let detail = js_sys::JSON::parse(&change.to_json()).map_err(|err| BehaviorError::js(&err))?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(THEME_CHANGE_EVENT, &init).map_err(|err| BehaviorError::js(&err))?;
    dom::window()?.dispatch_event(&event).map_err(|err| BehaviorError::js(&err))?;
    Ok(())
}
