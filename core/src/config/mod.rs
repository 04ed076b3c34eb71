//! Minimal configuration module for waypoint core
//!
//! Only exports data types and the manifest format. File discovery lives in
//! the CLI layer.

pub mod manifest;
pub mod types;

pub use manifest::{ManifestRoute, RouteManifest};
pub use types::RouterSettings;
