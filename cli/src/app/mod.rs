//! The problem-set application: its pages and its route table

pub mod pages;
pub mod routes;

pub use pages::{registry, summary_of, Page, DEFAULT_LAYOUT};
pub use routes::{app_routes, app_table, is_default_layout};
