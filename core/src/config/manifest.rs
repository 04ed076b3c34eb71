//! Route manifests
//!
//! A manifest declares a route tree in JSON, naming components instead of
//! holding them. A [`ViewRegistry`] turns the names into components.
//!
//! ```json
//! {
//!   "routes": [
//!     { "path": "/", "name": "LandingPage", "component": "LandingPage" },
//!     { "path": "/", "component": "DefaultLayout", "children": [
//!         { "path": "home", "name": "Home", "component": "MainContent" }
//!     ] }
//!   ]
//! }
//! ```

use crate::error::{ConfigError, Result};
use crate::route::{RouteEntry, RouteTable};
use crate::view::ViewRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A whole route tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteManifest {
    pub routes: Vec<ManifestRoute>,
}

/// One declared route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRoute {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Registered component name
    pub component: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub meta: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ManifestRoute>,
}

impl RouteManifest {
    /// Parse a manifest from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a manifest file
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    /// Turn the manifest into route entries, looking up every component
    pub fn into_entries(self, registry: &ViewRegistry) -> std::result::Result<Vec<RouteEntry>, ConfigError> {
        self.routes
            .into_iter()
            .map(|route| route.into_entry(registry))
            .collect()
    }

    /// Build and validate a route table
    pub fn build_table(self, registry: &ViewRegistry) -> std::result::Result<RouteTable, ConfigError> {
        RouteTable::new(self.into_entries(registry)?)
    }
}

impl ManifestRoute {
    fn into_entry(self, registry: &ViewRegistry) -> std::result::Result<RouteEntry, ConfigError> {
        let component = registry
            .component(&self.component)
            .ok_or_else(|| ConfigError::UnknownComponent {
                name: self.component.clone(),
            })?;

        let children = self
            .children
            .into_iter()
            .map(|child| child.into_entry(registry))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut entry = RouteEntry::new(self.path, component).with_children(children);
        entry.name = self.name.map(Into::into);
        entry.meta = self.meta;
        Ok(entry)
    }
}
