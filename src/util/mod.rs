//! Browser glue shared across components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate `web_sys`/`js_sys` plumbing from component logic.
//! Everything except the storage fallback needs the `browser` feature.

#[cfg(feature = "browser")]
pub mod bootstrap;
#[cfg(feature = "browser")]
pub mod clock;
#[cfg(feature = "browser")]
pub mod dom;
#[cfg(feature = "browser")]
pub mod listener;
pub mod storage;
