//! Error type shared by the page behaviors.
//!
//! ERROR HANDLING
//! ==============
//! None of these errors are fatal to the page. Callers log them and fall back
//! to a no-op so a broken widget never takes page interactivity down with it.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BehaviorError {
    #[error("unknown theme mode: {0}")]
    UnknownThemeMode(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("refresh action failed: {0}")]
    Refresh(String),
}

#[cfg(feature = "browser")]
impl BehaviorError {
    /// Wrap a thrown JS value, keeping its debug rendering as the message.
    pub fn js(value: &wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
