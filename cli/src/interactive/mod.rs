//! Interactive terminal browser
//!
//! Renders the current navigation with iocraft: the shared layout as a
//! bordered frame with a route menu, layout-free pages full width.

pub mod browser;
pub mod screen;

pub use browser::run_browser;
pub use screen::{menu_entries, MenuEntry, Screen};
