//! Route definitions
//!
//! A [`RouteEntry`] is one declared route: a path, an optional name, the
//! component it mounts and its nested children.

use crate::view::Component;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

/// Unique symbolic name of a route, used for navigation by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteName(pub String);

impl RouteName {
    /// Create a new route name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for RouteName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RouteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RouteName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A declared route
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Absolute at the top level, relative under a parent
    pub path: String,
    /// Name for programmatic navigation; layout parents usually have none
    pub name: Option<RouteName>,
    /// View mounted for this route
    pub component: Component,
    /// Nested routes rendered inside this route's view
    pub children: Vec<RouteEntry>,
    /// Free-form metadata
    pub meta: HashMap<String, String>,
}

impl RouteEntry {
    /// Create an unnamed route
    pub fn new(path: impl Into<String>, component: Component) -> Self {
        Self {
            path: path.into(),
            name: None,
            component,
            children: Vec::new(),
            meta: HashMap::new(),
        }
    }

    /// Create a named route
    pub fn named(path: impl Into<String>, name: impl Into<RouteName>, component: Component) -> Self {
        Self::new(path, component).with_name(name)
    }

    /// Set the route name
    pub fn with_name(mut self, name: impl Into<RouteName>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the children of this route
    pub fn with_children(mut self, children: Vec<RouteEntry>) -> Self {
        self.children = children;
        self
    }

    /// Append one child route
    pub fn child(mut self, child: RouteEntry) -> Self {
        self.children.push(child);
        self
    }

    /// Add metadata to this route
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Whether this route wraps nested routes
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
