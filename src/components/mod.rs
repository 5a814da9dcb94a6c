//! Page components: each mounts onto server-rendered markup, wires its
//! listeners, and exposes a teardown.

pub mod auto_alert;
pub mod navbar;
pub mod password_toggle;
pub mod pull_to_refresh;
pub mod theme_manager;
