//! Route listing command

use super::load_table;
use crate::config::CliConfig;
use crate::output::format_route_tree;
use anyhow::Result;
use colored::Colorize;
use tracing::info;

/// Print the route tree
pub async fn routes_command(config: &CliConfig) -> Result<()> {
    info!("Listing routes");

    let table = load_table(config).await?;
    let mode = config.router.history_mode();

    println!("{}\n", format_route_tree(&table, &mode));
    println!(
        "{} routes, {} named, {} history at '{}'",
        table.len().to_string().bold(),
        table.names().len().to_string().bold(),
        mode.kind(),
        mode.base()
    );

    Ok(())
}
