//! Startup, teardown, and the functions exported to page scripts.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::components::navbar::Navbar;
use crate::components::password_toggle::{self, PasswordToggles};
use crate::components::pull_to_refresh::{self, PullToRefreshHost};
use crate::components::theme_manager::ThemeManager;
use crate::components::auto_alert;
use crate::state::nav::RouteTable;
use crate::util::dom;

/// Everything mounted on this page.
struct App {
    theme: ThemeManager,
    page: Option<PageComponents>,
}

/// Components that need the parsed document.
struct PageComponents {
    navbar: Navbar,
    passwords: PasswordToggles,
    pulls: Vec<PullToRefreshHost>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }

    let theme = ThemeManager::init();
    APP.with(|app| *app.borrow_mut() = Some(App { theme, page: None }));
    auto_alert::schedule();

    let loading = dom::document().is_ok_and(|doc| doc.ready_state() == "loading");
    if !loading {
        mount_page();
        return;
    }
    let on_ready = Closure::once_into_js(mount_page);
    let registered = dom::document().and_then(|doc| {
        doc.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(|err| crate::error::BehaviorError::js(&err))
    });
    if let Err(err) = registered {
        log::warn!("startup: {err}");
    }
}

fn mount_page() {
    let page = PageComponents {
        navbar: Navbar::init(RouteTable::default()),
        passwords: PasswordToggles::init(),
        pulls: pull_to_refresh::mount_all(),
    };
    APP.with(|app| {
        if let Some(app) = app.borrow_mut().as_mut() {
            app.page = Some(page);
        }
    });
    log::debug!("startup: page components mounted");
}

/// Detach every listener and restore injected markup.
#[wasm_bindgen]
pub fn teardown() {
    let Some(mut app) = APP.with(|app| app.borrow_mut().take()) else {
        return;
    };
    app.theme.teardown();
    if let Some(mut page) = app.page.take() {
        page.navbar.teardown();
        page.passwords.teardown();
        for host in &page.pulls {
            host.destroy();
        }
    }
    log::debug!("teardown: complete");
}

fn with_theme<R>(f: impl FnOnce(&ThemeManager) -> R) -> Option<R> {
    APP.with(|app| app.borrow().as_ref().map(|app| f(&app.theme)))
}

/// Set the theme mode: `auto`, `light`, or `dark`.
///
/// # Errors
///
/// Throws on an unknown mode name.
#[wasm_bindgen(js_name = setTheme)]
pub fn set_theme(mode: &str) -> Result<(), JsError> {
    match with_theme(|theme| theme.set_theme(mode)) {
        Some(Ok(_)) | None => Ok(()),
        Some(Err(err)) => Err(JsError::new(&err.to_string())),
    }
}

/// Advance Auto -> Light -> Dark -> Auto; returns the new mode.
#[wasm_bindgen(js_name = cycleTheme)]
pub fn cycle_theme() -> Option<String> {
    with_theme(|theme| theme.cycle().mode.as_str().to_owned())
}

#[wasm_bindgen(js_name = getCurrentTheme)]
pub fn theme_mode() -> Option<String> {
    with_theme(|theme| theme.mode().as_str().to_owned())
}

#[wasm_bindgen(js_name = getEffectiveTheme)]
pub fn effective_theme() -> Option<String> {
    with_theme(|theme| theme.effective().as_str().to_owned())
}

#[wasm_bindgen(js_name = isSystemDarkMode)]
pub fn is_system_dark_mode() -> bool {
    with_theme(|theme| theme.system_theme() == crate::state::theme::Theme::Dark).unwrap_or(false)
}

/// Inline-handler entry point: `togglePasswordVisibility('password', this)`.
///
/// # Errors
///
/// Throws when the field does not exist.
#[wasm_bindgen(js_name = togglePasswordVisibility)]
pub fn toggle_password_visibility(input_id: &str, button: Element) -> Result<(), JsError> {
    password_toggle::toggle(input_id, &button)
        .map(|_| ())
        .map_err(|err| JsError::new(&err.to_string()))
}
