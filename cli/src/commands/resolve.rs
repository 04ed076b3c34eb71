//! URL resolution command

use super::load_table;
use crate::config::CliConfig;
use crate::output::{format_match, format_navigation};
use anyhow::{Context, Result};
use tracing::debug;
use waypoint_core::Router;

/// Navigate a fresh router to a URL and print what it mounted.
/// With `as_location`, the URL is read as the history mode writes it.
pub async fn resolve_command(config: &CliConfig, url: &str, as_location: bool) -> Result<()> {
    let table = load_table(config).await?;
    let router = Router::with_settings(table, &config.router);

    debug!("Resolving '{}'", url);
    let navigation = if as_location {
        router.push_location(url).await
    } else {
        router.push(url).await
    }
    .with_context(|| format!("Could not resolve '{}'", url))?;

    println!("{}", format_match(&navigation.route));
    println!("  {}", format_navigation(&navigation));
    Ok(())
}
