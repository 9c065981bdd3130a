//! Reusable UI components.

mod button;
mod input;
mod notice_banner;
mod select;

pub use button::*;
pub use input::*;
pub use notice_banner::*;
pub use select::*;
