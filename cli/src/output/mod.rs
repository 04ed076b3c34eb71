//! CLI-specific output
//!
//! Formatting of route tables, matches and navigations for the terminal.

pub mod formatters;

pub use formatters::{format_match, format_navigation, format_route_tree};
