//! Browser-independent behavior state.
//!
//! DESIGN
//! ======
//! Every rule the page behaviors follow lives here as plain data and
//! functions. The `components` layer samples the DOM, feeds these modules,
//! and applies what they return.

pub mod alerts;
pub mod nav;
pub mod password;
pub mod pull;
pub mod refresh;
pub mod theme;
