//! Preference stores: `localStorage` in the browser, memory otherwise.
//!
//! TRADE-OFFS
//! ==========
//! Private browsing modes may refuse `localStorage` entirely. The page then
//! runs on a `MemoryStore`, so preferences last for the session only.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::env::PreferenceStore;
use crate::error::BehaviorError;

/// Session-only store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, BehaviorError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), BehaviorError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BehaviorError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage`.
#[cfg(feature = "browser")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(feature = "browser")]
impl LocalStore {
    /// Open `localStorage`, or `None` when the browser refuses access.
    pub fn open() -> Option<Self> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => None,
            Err(err) => {
                log::debug!("storage: {}", BehaviorError::js(&err));
                None
            }
        }
    }
}

#[cfg(feature = "browser")]
impl PreferenceStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>, BehaviorError> {
        self.storage
            .get_item(key)
            .map_err(|err| BehaviorError::Storage(BehaviorError::js(&err).to_string()))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), BehaviorError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| BehaviorError::Storage(BehaviorError::js(&err).to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), BehaviorError> {
        self.storage
            .remove_item(key)
            .map_err(|err| BehaviorError::Storage(BehaviorError::js(&err).to_string()))
    }
}

/// Best available store for this page.
#[cfg(feature = "browser")]
pub fn open_preferences() -> std::rc::Rc<dyn PreferenceStore> {
    match LocalStore::open() {
        Some(store) => std::rc::Rc::new(store),
        None => {
            log::debug!("storage: localStorage unavailable, using memory store");
            std::rc::Rc::new(MemoryStore::new())
        }
    }
}
