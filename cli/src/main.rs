//! # waypoint CLI
//!
//! Command-line interface for waypoint - a declarative route table and navigation engine.
//!
//! ## Usage
//!
//! - `waypoint` - Browse the application routes interactively
//! - `waypoint routes` - Print the route tree
//! - `waypoint resolve /problem-set-board/42` - Resolve a URL
//! - `waypoint href ProblemSetBoardDetail -p problemSetId=42` - Build a URL from a route name
//! - `waypoint check` - Validate the route table
//!
//! The built-in table is the problem-set application; `--routes` swaps in a
//! JSON route manifest.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod commands;
mod config;
mod interactive;
mod output;

use commands::href::parse_key_value;
use commands::{browse_command, check_command, href_command, resolve_command, routes_command};
use config::CliConfigLoader;

/// waypoint - Declarative routes for single-page applications
#[derive(Parser)]
#[command(name = "waypoint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve, build and browse the routes of a single-page application")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON route manifest replacing the built-in table
    #[arg(long)]
    routes: Option<PathBuf>,

    /// History mode (web, hash, memory)
    #[arg(long)]
    history: Option<String>,

    /// Base prefix for locations
    #[arg(long)]
    base: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route tree
    Routes,

    /// Resolve a URL to its route and layout chain
    Resolve {
        /// Application path, e.g. /problem-set-board/42?tab=info
        url: String,

        /// Treat the URL as a location written by the history mode (base, `#`)
        #[arg(long)]
        location: bool,
    },

    /// Build the URL of a named route
    Href {
        /// Route name, e.g. ProblemSetBoardDetail
        name: String,

        /// Path parameter as key=value
        #[arg(short, long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// Query parameter as key=value
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },

    /// Validate the route table
    Check,

    /// Browse the routes in the terminal
    Browse {
        /// Path to open first
        #[arg(long, default_value = "/")]
        start: String,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(routes) = &cli.routes {
        loader = loader.with_routes_override(routes.clone());
    }

    if let Some(history) = &cli.history {
        loader = loader.with_history_override(history.clone());
    }

    if let Some(base) = &cli.base {
        loader = loader.with_base_override(base.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    waypoint_core::init_tracing_with_debug(cli.verbose);

    let config = build_config_loader(&cli).load().await?;

    match cli.command {
        Some(Commands::Routes) => routes_command(&config).await,
        Some(Commands::Resolve { url, location }) => resolve_command(&config, &url, location).await,
        Some(Commands::Href {
            name,
            params,
            query,
        }) => href_command(&config, &name, &params, &query).await,
        Some(Commands::Check) => check_command(&config).await,
        Some(Commands::Browse { start }) => browse_command(&config, &start).await,
        None => browse_command(&config, "/").await,
    }
}
