//! Named-route URL command

use super::load_table;
use crate::config::CliConfig;
use anyhow::Result;
use thiserror::Error;
use waypoint_core::{NavigationTarget, Router};

/// Error for malformed `key=value` arguments
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Expected key=value, got '{0}'")]
pub struct KeyValueError(pub String);

/// Parse a `key=value` argument
pub fn parse_key_value(raw: &str) -> Result<(String, String), KeyValueError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(KeyValueError(raw.to_string())),
    }
}

/// Print the location of a named route
pub async fn href_command(
    config: &CliConfig,
    name: &str,
    params: &[(String, String)],
    query: &[(String, String)],
) -> Result<()> {
    let table = load_table(config).await?;
    let router = Router::with_settings(table, &config.router);

    let mut target = NavigationTarget::named(name);
    for (key, value) in params {
        target = target.param(key, value);
    }
    for (key, value) in query {
        target = target.query(key, value);
    }

    println!("{}", router.href(&target)?);
    Ok(())
}
