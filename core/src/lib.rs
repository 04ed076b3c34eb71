//! # waypoint Core
//!
//! Core library for waypoint - a declarative route table and navigation engine.
//!
//! Routes map URL paths to views. Most views are nested under a shared layout
//! shell; a few stand alone. The table is built and validated once, then
//! resolves URLs to match chains and builds URLs from route names. The router
//! layers history, lazy view loading and last-navigation-wins on top.

// Core modules
pub mod config;
pub mod error;
pub mod history;
pub mod route;
pub mod router;
pub mod view;

// Re-export commonly used types
pub use config::{RouteManifest, RouterSettings};
pub use error::{ConfigError, Error, LoadError, NavigationError, Result};
pub use history::{create_history, History, HistoryKind, HistoryMode};
pub use route::{Location, Params, RouteEntry, RouteMatch, RouteName, RouteTable};
pub use router::{create_router, Navigation, NavigationTarget, Router};
pub use view::{Component, LazyView, StaticView, View, ViewHandle, ViewKind, ViewRegistry};

/// Current version of the waypoint-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tracing filter for the given debug mode
pub fn tracing_filter(debug: bool) -> tracing_subscriber::EnvFilter {
    let filter = if debug { "debug" } else { "info" };
    tracing_subscriber::EnvFilter::new(filter)
}

/// Initialize tracing with a specific debug mode.
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing_with_debug(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_filter(debug))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_filter() {
        use tracing::level_filters::LevelFilter;

        assert_eq!(tracing_filter(true).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(tracing_filter(false).max_level_hint(), Some(LevelFilter::INFO));
    }
}
