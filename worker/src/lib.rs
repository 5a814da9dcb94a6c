//! Offline cache manager for the HubSync service worker.
//!
//! The policy is pure and runs natively in tests; the `browser` feature adds
//! the service-worker entry point that wires it to the scope's events.
//!
//! | Module | Role |
//! |---|---|
//! | `manifest` | Cache generation name and precache list |
//! | `policy` | Request classification and synthetic fallbacks |
//! | `store` | Cache and network seams |
//! | `lifecycle` | `install`, `activate`, `respond` |
//!
//! EVENTS
//! ======
//! `install` precaches and skips waiting. `activate` deletes old generations
//! and claims open pages. `fetch` answers every GET; everything else goes
//! straight to the network.

pub mod error;
pub mod lifecycle;
pub mod manifest;
pub mod policy;
pub mod store;

#[cfg(feature = "browser")]
mod js;

#[cfg(feature = "browser")]
mod entry {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::{JsFuture, future_to_promise};
    use web_sys::{ExtendableEvent, FetchEvent, ServiceWorkerGlobalScope};

    use crate::js::{self, BrowserCaches, EventNetwork};
    use crate::lifecycle;
    use crate::manifest::CacheManifest;

    fn listen(scope: &ServiceWorkerGlobalScope, event: &str, handler: impl FnMut(JsValue) + 'static) {
        let callback = Closure::<dyn FnMut(JsValue)>::new(handler);
        if let Err(err) = scope.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            log::error!("sw: registering {event} failed: {err:?}");
        }
        callback.forget();
    }

    fn on_install(scope: ServiceWorkerGlobalScope, event: ExtendableEvent) {
        let work = future_to_promise(async move {
            let caches = BrowserCaches::new(&scope).map_err(|err| JsValue::from_str(&err.to_string()))?;
            let report = lifecycle::install(&caches, &CacheManifest::default())
                .await
                .map_err(|err| JsValue::from_str(&err.to_string()))?;
            log::debug!("sw: skipped during install: {:?}", report.skipped);
            JsFuture::from(scope.skip_waiting()?).await?;
            Ok(JsValue::UNDEFINED)
        });
        if let Err(err) = event.wait_until(&work) {
            log::error!("sw: install wait_until failed: {err:?}");
        }
    }

    fn on_activate(scope: ServiceWorkerGlobalScope, event: ExtendableEvent) {
        let work = future_to_promise(async move {
            let caches = BrowserCaches::new(&scope).map_err(|err| JsValue::from_str(&err.to_string()))?;
            match lifecycle::activate(&caches, &CacheManifest::default().cache_name).await {
                Ok(deleted) => log::debug!("sw: {} old generations removed", deleted.len()),
                Err(err) => log::warn!("sw: {err}"),
            }
            JsFuture::from(scope.clients().claim()).await?;
            Ok(JsValue::UNDEFINED)
        });
        if let Err(err) = event.wait_until(&work) {
            log::error!("sw: activate wait_until failed: {err:?}");
        }
    }

    fn on_fetch(scope: ServiceWorkerGlobalScope, event: FetchEvent) {
        let request = event.request();
        let described = js::describe(&request);
        if crate::policy::classify(&described) == crate::policy::Strategy::Passthrough {
            return;
        }
        let reply = future_to_promise(async move {
            let caches = BrowserCaches::new(&scope).map_err(|err| JsValue::from_str(&err.to_string()))?;
            let network = EventNetwork::new(scope, request);
            let manifest = CacheManifest::default();
            match lifecycle::respond(&caches, &network, &manifest, &described).await {
                Some(reply) => js::into_response(reply).map(JsValue::from),
                None => Err(JsValue::from_str("request not intercepted")),
            }
        });
        if let Err(err) = event.respond_with(&reply) {
            log::warn!("sw: respond_with failed: {err:?}");
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
        }

        let scope: ServiceWorkerGlobalScope = match js_sys::global().dyn_into() {
            Ok(scope) => scope,
            Err(_) => {
                log::warn!("sw: not running in a service worker scope");
                return;
            }
        };

        let install_scope = scope.clone();
        listen(&scope, "install", move |event: JsValue| {
            on_install(install_scope.clone(), event.unchecked_into());
        });
        let activate_scope = scope.clone();
        listen(&scope, "activate", move |event: JsValue| {
            on_activate(activate_scope.clone(), event.unchecked_into());
        });
        let fetch_scope = scope.clone();
        listen(&scope, "fetch", move |event: JsValue| {
            on_fetch(fetch_scope.clone(), event.unchecked_into());
        });
        log::info!("sw: {} ready", crate::manifest::CACHE_NAME);
    }
}
