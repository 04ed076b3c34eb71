//! Interactive browser command

use super::load_table;
use crate::config::CliConfig;
use crate::interactive::run_browser;
use anyhow::Result;
use tracing::debug;
use waypoint_core::Router;

/// Browse the route table in the terminal, starting at `start`
pub async fn browse_command(config: &CliConfig, start: &str) -> Result<()> {
    let table = load_table(config).await?;
    let router = Router::with_settings(table, &config.router);

    debug!("Starting browser at '{}'", start);
    run_browser(router, start).await
}
