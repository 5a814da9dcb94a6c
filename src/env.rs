//! Environment signals the behaviors read from the browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! State modules depend on these traits instead of `web_sys` so they run
//! under plain `cargo test`. Browser implementations live in `util`; tests
//! provide synthetic ones.

use std::rc::Rc;

use crate::error::BehaviorError;

/// Per-origin key/value persistence (`localStorage` in the browser).
pub trait PreferenceStore {
    /// Read `key`. `Ok(None)` means the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `BehaviorError::Storage` when the backing store is unavailable.
    fn load(&self, key: &str) -> Result<Option<String>, BehaviorError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `BehaviorError::Storage` when the backing store rejects the write.
    fn save(&self, key: &str, value: &str) -> Result<(), BehaviorError>;

    /// Remove `key`; removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `BehaviorError::Storage` when the backing store is unavailable.
    fn remove(&self, key: &str) -> Result<(), BehaviorError>;
}

/// The operating system's color-scheme preference.
pub trait ColorSchemeSignal {
    fn prefers_dark(&self) -> bool;
}

/// Timer source for the refresh cycle.
#[allow(async_fn_in_trait)]
pub trait Clock {
    async fn sleep(&self, ms: u32);
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Rc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, BehaviorError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), BehaviorError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), BehaviorError> {
        (**self).remove(key)
    }
}

impl<T: ColorSchemeSignal + ?Sized> ColorSchemeSignal for Rc<T> {
    fn prefers_dark(&self) -> bool {
        (**self).prefers_dark()
    }
}
