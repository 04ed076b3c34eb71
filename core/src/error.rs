//! Error types and handling for waypoint core

use thiserror::Error;

/// Result type alias for waypoint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for waypoint core
#[derive(Error, Debug)]
pub enum Error {
    /// Route table or settings errors, raised at construction time
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resolution and navigation errors
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Lazy view loading errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors. These describe a broken table and are not recoverable at runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Duplicate route name: {name}")]
    DuplicateName { name: String },

    #[error("Malformed path pattern '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("Path '{path}' is claimed by both '{first}' and '{second}'")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("No catch-all route declared")]
    MissingCatchAll,

    #[error("Unknown component: {name}")]
    UnknownComponent { name: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

/// Errors raised while resolving a URL or navigating
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No route matches '{path}'")]
    NotFound { path: String },

    #[error("Route '{name}' not found")]
    UnknownRoute { name: String },

    #[error("Missing required param '{param}' for route '{route}'")]
    MissingParam { route: String, param: String },

    #[error("Route '{route}' has no param named '{param}'")]
    UnknownParam { route: String, param: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Navigation to '{path}' was superseded by a newer navigation")]
    Superseded { path: String },

    #[error("Location '{location}' is outside base '{base}'")]
    OutsideBase { location: String, base: String },

    #[error("No history entry to move to")]
    NoHistory,
}

/// Lazy view loading errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to load view '{view}': {message}")]
    Failed { view: String, message: String },
}

impl Error {
    /// Whether this error only means a newer navigation took over
    pub fn is_superseded(&self) -> bool {
        matches!(self, Error::Navigation(NavigationError::Superseded { .. }))
    }
}
