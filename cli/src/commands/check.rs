//! Route table check command

use super::load_table;
use crate::config::CliConfig;
use anyhow::Result;
use colored::Colorize;
use tracing::info;

/// Validate the table and report on its shape
pub async fn check_command(config: &CliConfig) -> Result<()> {
    info!("Checking route table");

    // Construction runs every configuration check
    let table = load_table(config).await?;

    let lazy = table
        .records()
        .iter()
        .filter(|record| record.component.is_lazy())
        .count();
    let layouts = table.records().iter().filter(|record| record.is_layout()).count();

    println!("{} route table is valid", "✓".green().bold());
    println!("  {} routes, {} named", table.len(), table.names().len());
    println!("  {} lazy, {} layouts", lazy, layouts);

    // Report every top-level claim on the document root
    for root in table.roots().filter(|root| root.pattern.segments().is_empty()) {
        let role = if root.is_matchable() {
            "route"
        } else {
            "layout"
        };
        println!("  root '/' claimed by {} {}", role, root.label().cyan());
    }

    if !table.has_catch_all() {
        println!(
            "  {} no catch-all route: unmatched URLs are left to the host's not-found handling",
            "!".yellow().bold()
        );
    }

    Ok(())
}
