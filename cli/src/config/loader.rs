//! Simple CLI configuration loader for waypoint
//!
//! Implements single-source priority loading with env and flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./waypoint.json or ./.waypoint/config.json
//! 3. Git repository root: <repo_root>/.waypoint/config.json
//! 4. XDG config: $XDG_CONFIG_HOME/waypoint/config.json or the platform config dir
//! 5. Built-in defaults (no files)
//!
//! `WAYPOINT_HISTORY` and `WAYPOINT_BASE` override the file, flags override both.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use waypoint_core::{HistoryKind, RouterSettings};

/// Raw configuration file format (simple single-file schema)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConfig {
    /// History mode: web, hash or memory
    pub history: Option<String>,
    /// Base prefix for locations
    pub base: Option<String>,
    /// Maximum number of history entries
    pub max_history: Option<usize>,
    /// Reject tables without a catch-all route
    pub require_catch_all: Option<bool>,
    /// Route manifest replacing the built-in table
    pub routes: Option<PathBuf>,
}

/// Fully resolved CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub router: RouterSettings,
    pub routes: Option<PathBuf>,
    /// File the configuration came from, if any
    pub source: Option<PathBuf>,
}

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    history_override: Option<String>,
    base_override: Option<String>,
    routes_override: Option<PathBuf>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            history_override: None,
            base_override: None,
            routes_override: None,
        }
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set history mode override
    pub fn with_history_override(mut self, history: String) -> Self {
        self.history_override = Some(history);
        self
    }

    /// Set base override
    pub fn with_base_override(mut self, base: String) -> Self {
        self.base_override = Some(base);
        self
    }

    /// Set route manifest override
    pub fn with_routes_override(mut self, routes: PathBuf) -> Self {
        self.routes_override = Some(routes);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<CliConfig> {
        // Step 1: Find and load base configuration
        let (mut config, source) = if let Some(override_path) = &self.config_override {
            let path = expand_path(override_path);
            let config = self.load_from_path(&path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?;
            (config, Some(path))
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply environment overrides
        if let Ok(history) = std::env::var("WAYPOINT_HISTORY") {
            config.history = Some(history);
        }
        if let Ok(base) = std::env::var("WAYPOINT_BASE") {
            config.base = Some(base);
        }

        // Step 3: Apply flag overrides
        if let Some(history) = &self.history_override {
            config.history = Some(history.clone());
        }
        if let Some(base) = &self.base_override {
            config.base = Some(base.clone());
        }
        if let Some(routes) = &self.routes_override {
            config.routes = Some(routes.clone());
        }

        // Step 4: Resolve to final settings
        let resolved = self.resolve_config(config, source)?;
        debug!(
            "Resolved config: {} history, base '{}'",
            resolved.router.history, resolved.router.base
        );
        Ok(resolved)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<(RawConfig, Option<PathBuf>)> {
        let cwd = std::env::current_dir()?;

        let mut candidates = vec![
            cwd.join("waypoint.json"),
            cwd.join(".waypoint").join("config.json"),
        ];
        if let Some(git_root) = self.find_git_root()? {
            candidates.push(git_root.join(".waypoint").join("config.json"));
        }
        if let Some(config_dir) = self.get_xdg_config_dir() {
            candidates.push(config_dir.join("waypoint").join("config.json"));
        }

        for candidate in candidates {
            if candidate.exists() {
                let config = self.load_file(&candidate).await?;
                return Ok((config, Some(candidate)));
            }
        }

        debug!("No config file found, using defaults");
        Ok((RawConfig::default(), None))
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            // Try config.json in the directory
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Find git repository root
    fn find_git_root(&self) -> Result<Option<PathBuf>> {
        let mut current = std::env::current_dir()?;

        loop {
            if current.join(".git").exists() {
                return Ok(Some(current));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Get XDG config directory
    fn get_xdg_config_dir(&self) -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            Some(PathBuf::from(xdg_config))
        } else {
            dirs::config_dir()
        }
    }

    /// Resolve raw config to CliConfig
    fn resolve_config(&self, config: RawConfig, source: Option<PathBuf>) -> Result<CliConfig> {
        let mut router = RouterSettings::default();

        if let Some(history) = &config.history {
            router.history = history
                .parse::<HistoryKind>()
                .with_context(|| format!("Unsupported history mode: {}", history))?;
        }
        if let Some(base) = config.base {
            router.base = base;
        }
        if let Some(max_history) = config.max_history {
            router.max_history = max_history;
        }
        if let Some(require_catch_all) = config.require_catch_all {
            router.require_catch_all = require_catch_all;
        }

        router
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        // Relative manifest paths are relative to the config file
        let routes = config.routes.map(|routes| {
            let routes = expand_path(&routes);
            match source.as_ref().and_then(|source| source.parent()) {
                Some(dir) if routes.is_relative() => dir.join(routes),
                _ => routes,
            }
        });

        Ok(CliConfig {
            router,
            routes,
            source,
        })
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand `~` and environment variables in a path
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waypoint.json");
        tokio::fs::write(
            &path,
            r#"{ "history": "hash", "base": "/app", "routes": "routes.json" }"#,
        )
        .await
        .unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(path.clone())
            .load()
            .await
            .unwrap();

        assert_eq!(config.router.history, HistoryKind::Hash);
        assert_eq!(config.router.base, "/app");
        assert_eq!(config.routes, Some(dir.path().join("routes.json")));
        assert_eq!(config.source, Some(path));
    }

    #[tokio::test]
    async fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("config.json"), r#"{ "max_history": 10 }"#)
            .await
            .unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(dir.path().to_path_buf())
            .load()
            .await
            .unwrap();
        assert_eq!(config.router.max_history, 10);
    }

    #[tokio::test]
    async fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waypoint.json");
        tokio::fs::write(&path, r#"{ "history": "hash" }"#).await.unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(path)
            .with_history_override("memory".to_string())
            .with_base_override("/studio".to_string())
            .load()
            .await
            .unwrap();
        assert_eq!(config.router.history, HistoryKind::Memory);
        assert_eq!(config.router.base, "/studio");
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waypoint.json");

        tokio::fs::write(&path, r#"{ "history": "tape" }"#).await.unwrap();
        let result = CliConfigLoader::new()
            .with_config_override(path.clone())
            .load()
            .await;
        assert!(result.is_err());

        tokio::fs::write(&path, r#"{ "base": "no-slash" }"#).await.unwrap();
        let result = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_override_path() {
        let result = CliConfigLoader::new()
            .with_config_override(PathBuf::from("/definitely/not/here.json"))
            .load()
            .await;
        assert!(result.is_err());
    }
}
