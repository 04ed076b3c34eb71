//! Route table module
//!
//! Declared routes, path patterns, URL locations and the immutable table
//! that resolves URLs and builds URLs from route names.

pub mod entry;
pub mod location;
pub mod pattern;
pub mod table;

// Re-export commonly used types
pub use entry::{RouteEntry, RouteName};
pub use location::Location;
pub use pattern::{Params, PathPattern, Segment};
pub use table::{MatchedRoute, RouteMatch, RouteRecord, RouteTable};
