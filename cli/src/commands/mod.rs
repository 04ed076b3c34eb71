//! CLI command implementations

pub mod browse;
pub mod check;
pub mod href;
pub mod resolve;
pub mod routes;

pub use browse::browse_command;
pub use check::check_command;
pub use href::href_command;
pub use resolve::resolve_command;
pub use routes::routes_command;

use crate::app::{app_table, registry};
use crate::config::CliConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;
use waypoint_core::{RouteManifest, RouteTable};

/// Build the route table the configuration asks for: a manifest file if one
/// is configured, otherwise the built-in application table.
pub async fn load_table(config: &CliConfig) -> Result<Arc<RouteTable>> {
    let views = registry();

    let table = match &config.routes {
        Some(path) => {
            debug!("Loading route manifest from {}", path.display());
            RouteManifest::load(path)
                .await
                .with_context(|| format!("Failed to load route manifest: {}", path.display()))?
                .build_table(&views)
                .with_context(|| format!("Invalid route manifest: {}", path.display()))?
        }
        None => app_table(&views).context("Invalid application route table")?,
    };

    let table = if config.router.require_catch_all {
        table
            .require_catch_all()
            .context("The route table must declare a catch-all route")?
    } else {
        table
    };

    Ok(Arc::new(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use waypoint_core::RouterSettings;

    fn config(routes: Option<PathBuf>, require_catch_all: bool) -> CliConfig {
        CliConfig {
            router: RouterSettings {
                require_catch_all,
                ..RouterSettings::default()
            },
            routes,
            source: None,
        }
    }

    #[tokio::test]
    async fn test_builtin_table() {
        let table = load_table(&config(None, false)).await.unwrap();
        assert!(table.get("ProblemSetBoardDetail").is_some());
    }

    #[tokio::test]
    async fn test_builtin_table_has_no_catch_all() {
        assert!(load_table(&config(None, true)).await.is_err());
    }

    #[tokio::test]
    async fn test_manifest_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        tokio::fs::write(
            &path,
            r#"{ "routes": [
                { "path": "/", "name": "LandingPage", "component": "LandingPage" },
                { "path": "/*rest", "name": "Fallback", "component": "LandingPage" }
            ] }"#,
        )
        .await
        .unwrap();

        let table = load_table(&config(Some(path), true)).await.unwrap();
        assert_eq!(table.names().len(), 2);
        assert!(table.has_catch_all());
    }
}
