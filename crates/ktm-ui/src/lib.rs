//! KTM Admin UI Components
//!
//! Small Dioxus building blocks for the admin window: buttons, text and
//! search inputs, the faculty/major selects and the notice banner.
//!
//! Styling lives in the application's global stylesheet; components only
//! attach class names.

pub mod components;

pub use components::*;
