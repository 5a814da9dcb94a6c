//! DOM host for the pull-to-refresh gesture.
//!
//! ARCHITECTURE
//! ============
//! `PullController` decides; this host samples the page into a `Surface`,
//! forwards touch/mouse/scroll events, and performs the returned effects on
//! three injected elements: an indicator, a message, and a content wrapper
//! holding the container's original children.
//!
//! Listener closures hold a `Weak` back-reference so dropping the host frees
//! everything. User callbacks run with no `RefCell` borrow held.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Event, MouseEvent, Node, TouchEvent};

use crate::config::{PULL_CONTAINER_ATTR, PULL_INITIALIZED_ATTR, PullOptions};
use crate::error::BehaviorError;
use crate::state::pull::{PULL_MESSAGE, PullController, PullEffect, PullEvent, PullVisual, Surface};
use crate::state::refresh::run_refresh_cycle;
use crate::util::clock::BrowserClock;
use crate::util::dom;
use crate::util::listener::Listener;

const CONTAINER_CLASS: &str = "pull-to-refresh-container";
const INDICATOR_CLASS: &str = "pull-to-refresh-indicator";
const MESSAGE_CLASS: &str = "pull-to-refresh-message";
const CONTENT_CLASS: &str = "pull-to-refresh-content";
const ARROW_ICON: &str = "bi bi-arrow-down";
const SPINNER_ICON: &str = "bi bi-arrow-clockwise";

pub type RefreshAction = Rc<dyn Fn() -> LocalBoxFuture<'static, Result<(), BehaviorError>>>;
pub type DistanceObserver = Rc<dyn Fn(f64)>;

/// Callbacks supplied by the embedding page.
#[derive(Clone)]
pub struct PullHooks {
    pub refresh: RefreshAction,
    pub on_pull: Option<DistanceObserver>,
    pub on_release: Option<DistanceObserver>,
}

impl Default for PullHooks {
    fn default() -> Self {
        Self { refresh: Rc::new(|| reload_page().boxed_local()), on_pull: None, on_release: None }
    }
}

async fn reload_page() -> Result<(), BehaviorError> {
    dom::window()?.location().reload().map_err(|err| BehaviorError::js(&err))
}

/// The injected elements.
struct Parts {
    indicator: Element,
    message: Element,
    content: Element,
}

impl Parts {
    fn arrow(&self) -> Option<Element> {
        dom::query_one(&self.indicator, "i")
    }
}

struct Inner {
    container: Element,
    controller: PullController,
    hooks: PullHooks,
    listeners: Vec<Listener>,
    torn_down: bool,
}

/// A mounted pull-to-refresh container.
pub struct PullToRefreshHost {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Clone, Copy)]
enum Input {
    Down,
    Move,
    Up,
    Scroll,
}

impl PullToRefreshHost {
    /// Wrap `container` and start listening.
    ///
    /// # Errors
    ///
    /// Returns `BehaviorError` if the wrapper elements cannot be created or a
    /// listener cannot be attached.
    pub fn mount(container: Element, options: PullOptions, hooks: PullHooks) -> Result<Self, BehaviorError> {
        ensure_parts(&container)?;
        let inner = Rc::new(RefCell::new(Inner {
            container: container.clone(),
            controller: PullController::new(options),
            hooks,
            listeners: Vec::new(),
            torn_down: false,
        }));

        let document = dom::document()?;
        let window = dom::window()?;
        let weak = Rc::downgrade(&inner);
        let listeners = vec![
            Listener::active(&document, "touchstart", handler(&weak, Input::Down))?,
            Listener::active(&document, "touchmove", handler(&weak, Input::Move))?,
            Listener::active(&document, "touchend", handler(&weak, Input::Up))?,
            Listener::new(&document, "mousedown", handler(&weak, Input::Down))?,
            Listener::new(&document, "mousemove", handler(&weak, Input::Move))?,
            Listener::new(&document, "mouseup", handler(&weak, Input::Up))?,
            Listener::new(&window, "scroll", handler(&weak, Input::Scroll))?,
            Listener::new(&container, "scroll", handler(&weak, Input::Scroll))?,
        ];
        inner.borrow_mut().listeners = listeners;
        log::debug!("pull-to-refresh: mounted with threshold {}", options.threshold);
        Ok(Self { inner })
    }

    pub fn enable(&self) {
        self.inner.borrow_mut().controller.enable();
    }

    pub fn disable(&self) {
        let effects = self.inner.borrow_mut().controller.disable();
        perform(&self.inner, None, effects);
    }

    /// Detach listeners and restore the original markup. Safe to repeat.
    pub fn destroy(&self) {
        let effects = self.inner.borrow_mut().controller.destroy();
        perform(&self.inner, None, effects);
    }

    pub fn is_refreshing(&self) -> bool {
        self.inner.borrow().controller.is_refreshing()
    }
}

/// Mount every `[data-pull-to-refresh]` container not mounted yet.
pub fn mount_all() -> Vec<PullToRefreshHost> {
    let mut hosts = Vec::new();
    for container in dom::query_document(&format!("[{PULL_CONTAINER_ATTR}]")) {
        if container.has_attribute(PULL_INITIALIZED_ATTR) {
            continue;
        }
        dom::set_attr(&container, PULL_INITIALIZED_ATTR, "true");
        let options = PullOptions::from_dataset(
            container.get_attribute("data-threshold").as_deref(),
            container.get_attribute("data-resistance").as_deref(),
        );
        match PullToRefreshHost::mount(container, options, PullHooks::default()) {
            Ok(host) => hosts.push(host),
            Err(err) => log::warn!("pull-to-refresh: {err}"),
        }
    }
    hosts
}

fn handler(weak: &Weak<RefCell<Inner>>, input: Input) -> impl FnMut(Event) + 'static {
    let weak = weak.clone();
    move |event: Event| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let Some(pull_event) = translate(&event, input) else {
            return;
        };
        let surface = sample_surface(&inner.borrow().container);
        let effects = inner.borrow_mut().controller.dispatch(pull_event, surface);
        perform(&inner, Some(&event), effects);
    }
}

fn translate(event: &Event, input: Input) -> Option<PullEvent> {
    match input {
        Input::Down => pointer_y(event).map(|y| PullEvent::PointerDown { y }),
        Input::Move => pointer_y(event).map(|y| PullEvent::PointerMove { y }),
        Input::Up => Some(PullEvent::PointerUp),
        Input::Scroll => Some(PullEvent::Scroll),
    }
}

fn pointer_y(event: &Event) -> Option<f64> {
    if let Some(touch) = event.dyn_ref::<TouchEvent>() {
        return touch.touches().get(0).map(|t| f64::from(t.client_y()));
    }
    event.dyn_ref::<MouseEvent>().map(|mouse| f64::from(mouse.client_y()))
}

fn sample_surface(container: &Element) -> Surface {
    Surface { at_top: dom::window_at_top() && container.scroll_top() <= 0, modal_open: modal_open() }
}

/// Bootstrap marks open modals three ways; any one counts.
fn modal_open() -> bool {
    let Ok(doc) = dom::document() else {
        return false;
    };
    let shown = |selector: &str| doc.query_selector(selector).unwrap_or_default().is_some();
    let body_flag = doc.body().is_some_and(|body| dom::has_class(&body, "modal-open"));
    shown(".modal.show") || body_flag || shown(".modal-backdrop")
}

fn perform(inner: &Rc<RefCell<Inner>>, event: Option<&Event>, effects: Vec<PullEffect>) {
    for effect in effects {
        match effect {
            PullEffect::PreventDefault => {
                if let Some(event) = event {
                    event.prevent_default();
                }
            }
            PullEffect::Render(visual) => inner.borrow().render(visual),
            PullEffect::Pulled(distance) => {
                let observer = inner.borrow().hooks.on_pull.clone();
                if let Some(observer) = observer {
                    observer(distance);
                }
            }
            PullEffect::Released(distance) => {
                let observer = inner.borrow().hooks.on_release.clone();
                if let Some(observer) = observer {
                    observer(distance);
                }
            }
            PullEffect::BeginRefresh => begin_refresh(inner),
            PullEffect::Reset => inner.borrow().reset_visuals(),
            PullEffect::Teardown => inner.borrow_mut().teardown(),
        }
    }
}

fn begin_refresh(inner: &Rc<RefCell<Inner>>) {
    let (options, action) = {
        let state = inner.borrow();
        state.show_loading(state.controller.refreshing_visual());
        (state.controller.options(), Rc::clone(&state.hooks.refresh))
    };
    let weak = Rc::downgrade(inner);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = run_refresh_cycle(&BrowserClock, options, || action()).await {
            log::debug!("pull-to-refresh: cycle settled with error: {err}");
        }
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let effects = inner.borrow_mut().controller.finish_refresh();
        perform(&inner, None, effects);
    });
}

impl Inner {
    fn parts(&self) -> Option<Parts> {
        if self.torn_down {
            return None;
        }
        match ensure_parts(&self.container) {
            Ok(parts) => Some(parts),
            Err(err) => {
                log::warn!("pull-to-refresh: {err}");
                None
            }
        }
    }

    fn render(&self, visual: PullVisual) {
        let Some(parts) = self.parts() else {
            return;
        };
        dom::set_class(&parts.indicator, "visible", visual.visible);
        dom::set_class(&parts.message, "visible", visual.visible);
        dom::set_class(&parts.indicator, "ready", visual.ready);
        parts.message.set_text_content(Some(visual.message));
        dom::set_style(&parts.content, "transform", &format!("translateY({}px)", visual.offset));
        if let Some(arrow) = parts.arrow() {
            dom::set_style(&arrow, "transform", &format!("rotate({}deg)", visual.arrow_rotation));
        }
    }

    fn show_loading(&self, visual: PullVisual) {
        let Some(parts) = self.parts() else {
            return;
        };
        dom::set_class(&parts.indicator, "loading", true);
        dom::set_class(&parts.indicator, "ready", false);
        parts.message.set_text_content(Some(visual.message));
        if let Some(arrow) = parts.arrow() {
            arrow.set_class_name(SPINNER_ICON);
            dom::set_style(&arrow, "transform", "none");
        }
        dom::set_style(&parts.content, "transform", &format!("translateY({}px)", visual.offset));
    }

    fn reset_visuals(&self) {
        let Some(parts) = self.parts() else {
            return;
        };
        dom::set_style(&parts.content, "transform", "translateY(0)");
        for class in ["visible", "ready", "loading"] {
            dom::set_class(&parts.indicator, class, false);
        }
        dom::set_class(&parts.message, "visible", false);
        parts.message.set_text_content(Some(PULL_MESSAGE));
        if let Some(arrow) = parts.arrow() {
            arrow.set_class_name(ARROW_ICON);
            dom::set_style(&arrow, "transform", "none");
        }
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        for listener in &mut self.listeners {
            listener.detach();
        }
        self.listeners.clear();
        restore_markup(&self.container);
        log::debug!("pull-to-refresh: destroyed");
    }
}

/// Direct child of `container` carrying `class`.
fn child_with_class(container: &Element, class: &str) -> Option<Element> {
    dom::query_one(container, &format!(":scope > .{class}"))
}

/// Find the injected elements, creating only the missing ones.
fn ensure_parts(container: &Element) -> Result<Parts, BehaviorError> {
    let doc = dom::document()?;

    let content = match child_with_class(container, CONTENT_CLASS) {
        Some(content) => content,
        None => {
            let content = dom::create(&doc, "div", CONTENT_CLASS)?;
            for node in child_nodes(container) {
                let injected = node
                    .dyn_ref::<Element>()
                    .is_some_and(|el| dom::has_class(el, INDICATOR_CLASS) || dom::has_class(el, MESSAGE_CLASS));
                if !injected {
                    content.append_child(&node).map_err(|err| BehaviorError::js(&err))?;
                }
            }
            container.append_child(&content).map_err(|err| BehaviorError::js(&err))?;
            content
        }
    };

    let message = match child_with_class(container, MESSAGE_CLASS) {
        Some(message) => message,
        None => {
            let message = dom::create(&doc, "div", MESSAGE_CLASS)?;
            message.set_text_content(Some(PULL_MESSAGE));
            container.insert_before(&message, Some(&content)).map_err(|err| BehaviorError::js(&err))?;
            message
        }
    };

    let indicator = match child_with_class(container, INDICATOR_CLASS) {
        Some(indicator) => indicator,
        None => {
            let indicator = dom::create(&doc, "div", INDICATOR_CLASS)?;
            let arrow = dom::create(&doc, "i", ARROW_ICON)?;
            indicator.append_child(&arrow).map_err(|err| BehaviorError::js(&err))?;
            container.insert_before(&indicator, Some(&message)).map_err(|err| BehaviorError::js(&err))?;
            indicator
        }
    };

    dom::set_class(container, CONTAINER_CLASS, true);
    Ok(Parts { indicator, message, content })
}

fn child_nodes(parent: &Node) -> Vec<Node> {
    let list = parent.child_nodes();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

/// Undo `ensure_parts`: drop injected elements, unwrap the content in place.
fn restore_markup(container: &Element) {
    for class in [INDICATOR_CLASS, MESSAGE_CLASS] {
        if let Some(el) = child_with_class(container, class) {
            el.remove();
        }
    }
    if let Some(content) = child_with_class(container, CONTENT_CLASS) {
        for node in child_nodes(&content) {
            if let Err(err) = container.insert_before(&node, Some(&content)) {
                log::warn!("pull-to-refresh: unwrap failed: {}", BehaviorError::js(&err));
            }
        }
        content.remove();
    }
    dom::set_class(container, CONTAINER_CLASS, false);
    dom::remove_attr(container, PULL_INITIALIZED_ATTR);
}

// =============================================================================
// JS EXPORT
// =============================================================================

/// `new PullToRefresh(container, { threshold, resistance, refreshCallback, onPull, onRelease })`.
#[wasm_bindgen(js_name = PullToRefresh)]
pub struct PullToRefreshHandle {
    host: PullToRefreshHost,
}

#[wasm_bindgen(js_class = PullToRefresh)]
impl PullToRefreshHandle {
    /// # Errors
    ///
    /// Throws if the container cannot be wrapped.
    #[wasm_bindgen(constructor)]
    pub fn new(container: Element, options: JsValue) -> Result<PullToRefreshHandle, JsValue> {
        let defaults = PullOptions::default();
        let pull_options = PullOptions {
            threshold: number_option(&options, "threshold").unwrap_or(defaults.threshold),
            resistance: number_option(&options, "resistance").unwrap_or(defaults.resistance),
            ..defaults
        };
        let mut hooks = PullHooks::default();
        if let Some(callback) = function_option(&options, "refreshCallback") {
            hooks.refresh = Rc::new(move || call_refresh(callback.clone()).boxed_local());
        }
        hooks.on_pull = function_option(&options, "onPull").map(distance_observer);
        hooks.on_release = function_option(&options, "onRelease").map(distance_observer);

        let host = PullToRefreshHost::mount(container, pull_options, hooks)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Self { host })
    }

    pub fn enable(&self) {
        self.host.enable();
    }

    pub fn disable(&self) {
        self.host.disable();
    }

    pub fn destroy(&self) {
        self.host.destroy();
    }

    #[wasm_bindgen(getter, js_name = isRefreshing)]
    pub fn is_refreshing(&self) -> bool {
        self.host.is_refreshing()
    }
}

fn option_value(options: &JsValue, key: &str) -> Option<JsValue> {
    if !options.is_object() {
        return None;
    }
    let value = Reflect::get(options, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED);
    (!value.is_undefined() && !value.is_null()).then_some(value)
}

fn number_option(options: &JsValue, key: &str) -> Option<f64> {
    option_value(options, key)?.as_f64().filter(|v| v.is_finite() && *v > 0.0)
}

fn function_option(options: &JsValue, key: &str) -> Option<Function> {
    option_value(options, key)?.dyn_into::<Function>().ok()
}

fn distance_observer(callback: Function) -> DistanceObserver {
    Rc::new(move |distance: f64| {
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_f64(distance)) {
            log::warn!("pull-to-refresh: observer threw: {}", BehaviorError::js(&err));
        }
    })
}

/// Call a page-supplied refresh callback and await it if it returned a promise.
async fn call_refresh(callback: Function) -> Result<(), BehaviorError> {
    let returned = callback.call0(&JsValue::NULL).map_err(|err| BehaviorError::Refresh(BehaviorError::js(&err).to_string()))?;
    if let Some(promise) = returned.dyn_ref::<Promise>() {
        JsFuture::from(promise.clone())
            .await
            .map_err(|err| BehaviorError::Refresh(BehaviorError::js(&err).to_string()))?;
    }
    Ok(())
}
