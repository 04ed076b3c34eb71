//! CLI configuration discovery and loading

pub mod loader;

pub use loader::{CliConfig, CliConfigLoader};
