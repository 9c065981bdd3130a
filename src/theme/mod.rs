//! Styling for the admin window.

mod styles;

pub use styles::GLOBAL_STYLES;
