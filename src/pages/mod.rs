//! Page components for KTM Admin.

mod admin;

pub use admin::Admin;
