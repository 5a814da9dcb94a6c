//! # hubsync-web
//!
//! WebAssembly behaviors for the HubSync front end: theme switching,
//! navigation highlighting, password visibility toggles, alert
//! auto-dismissal, and pull-to-refresh. The offline cache lives in the
//! sibling `worker` crate.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`state`] | Browser-independent rules and state machines |
//! | [`env`] | Traits for the environment signals those rules read |
//! | [`config`] | Keys, selectors, colors, and timings |
//! | [`error`] | Shared error type |
//! | `components` | DOM mounting for each behavior (`browser` feature) |
//! | [`util`] | Storage fallback plus `web_sys` helpers |
//!
//! With the `browser` feature the crate starts itself on load: it installs
//! the panic hook and console logger, applies the theme immediately, and
//! mounts everything else once the document is parsed.

pub mod config;
pub mod env;
pub mod error;
pub mod state;
pub mod util;

#[cfg(feature = "browser")]
pub mod components;

#[cfg(feature = "browser")]
mod app;

#[cfg(feature = "browser")]
pub use app::*;
