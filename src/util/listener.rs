//! Owned DOM event listener registrations.
//!
//! A `Listener` keeps its closure alive for as long as the registration
//! exists. `detach` removes it from the target; dropping without detaching
//! also removes it, so a torn-down component leaves nothing attached.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use crate::error::BehaviorError;

pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Option<Closure<dyn FnMut(Event)>>,
}

impl Listener {
    /// Attach `handler` for `event` on `target`.
    ///
    /// # Errors
    ///
    /// Returns `BehaviorError::Js` if the browser rejects the registration.
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, BehaviorError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|err| BehaviorError::js(&err))?;
        Ok(Self { target: target.clone(), event, callback: Some(callback) })
    }

    /// Attach a non-passive listener, for handlers that call `prevent_default`.
    ///
    /// # Errors
    ///
    /// Returns `BehaviorError::Js` if the browser rejects the registration.
    pub fn active<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, BehaviorError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| BehaviorError::js(&err))?;
        Ok(Self { target: target.clone(), event, callback: Some(callback) })
    }

    /// Remove the registration. Safe to call more than once.
    pub fn detach(&mut self) {
        let Some(callback) = self.callback.take() else {
            return;
        };
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, callback.as_ref().unchecked_ref())
        {
            log::debug!("listener: removing {} failed: {}", self.event, BehaviorError::js(&err));
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}
