//! Views and view components
//!
//! A route points at a [`Component`]: either a view bound when the table is
//! built, or a lazy view that is fetched the first time a navigation needs it.
//! Lazy views are memoized after their first successful load; a failed load is
//! not cached, so the next navigation tries again.

use crate::error::LoadError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// What role a view plays in the mounted tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// A leaf page
    Page,
    /// A shell that renders shared chrome around a child slot
    Layout,
}

/// Trait for all views that a route can mount
pub trait View: Send + Sync + fmt::Debug {
    /// Component name, e.g. `ProblemSetBoardDetail`
    fn name(&self) -> &str;

    /// Human-readable title
    fn title(&self) -> &str {
        self.name()
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Page
    }

    /// Access to the concrete type for renderers that know it
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a mounted view
pub type ViewHandle = Arc<dyn View>;

/// A plain named view with no content of its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticView {
    name: String,
    title: String,
    kind: ViewKind,
}

impl StaticView {
    /// Create a page view
    pub fn page(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            kind: ViewKind::Page,
        }
    }

    /// Create a layout view
    pub fn layout(name: impl Into<String>) -> Self {
        Self {
            kind: ViewKind::Layout,
            ..Self::page(name)
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Wrap into a shareable handle
    pub fn handle(self) -> ViewHandle {
        Arc::new(self)
    }
}

impl View for StaticView {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Asynchronous source of a view
#[async_trait]
pub trait ViewLoader: Send + Sync {
    /// Fetch the view. Called at most once per successful load.
    async fn load(&self) -> Result<ViewHandle, LoadError>;
}

#[async_trait]
impl<F, Fut> ViewLoader for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<ViewHandle, LoadError>> + Send + 'static,
{
    async fn load(&self) -> Result<ViewHandle, LoadError> {
        (self)().await
    }
}

/// A view fetched on first use and memoized afterwards
#[derive(Clone)]
pub struct LazyView {
    name: String,
    loader: Arc<dyn ViewLoader>,
    cell: Arc<OnceCell<ViewHandle>>,
}

impl LazyView {
    /// Create a lazy view with the given component name and loader
    pub fn new(name: impl Into<String>, loader: impl ViewLoader + 'static) -> Self {
        Self {
            name: name.into(),
            loader: Arc::new(loader),
            cell: Arc::new(OnceCell::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a load has already succeeded
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// The loaded view, if any
    pub fn loaded(&self) -> Option<ViewHandle> {
        self.cell.get().cloned()
    }

    /// Load the view, or return the memoized one.
    /// Concurrent callers share a single in-flight load.
    pub async fn load(&self) -> Result<ViewHandle, LoadError> {
        let view = self
            .cell
            .get_or_try_init(|| async {
                debug!("Loading lazy view: {}", self.name);
                self.loader.load().await
            })
            .await?;
        Ok(view.clone())
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Reference from a route to its view
#[derive(Debug, Clone)]
pub enum Component {
    /// Bound when the table is constructed
    Eager(ViewHandle),
    /// Fetched on first navigation
    Lazy(LazyView),
}

impl Component {
    /// Eager component from any view
    pub fn eager(view: impl View + 'static) -> Self {
        Component::Eager(Arc::new(view))
    }

    /// Lazy component from a loader
    pub fn lazy(name: impl Into<String>, loader: impl ViewLoader + 'static) -> Self {
        Component::Lazy(LazyView::new(name, loader))
    }

    /// Component name, available without loading
    pub fn name(&self) -> &str {
        match self {
            Component::Eager(view) => view.name(),
            Component::Lazy(lazy) => lazy.name(),
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Component::Lazy(_))
    }

    /// The view if it is available without waiting
    pub fn ready(&self) -> Option<ViewHandle> {
        match self {
            Component::Eager(view) => Some(view.clone()),
            Component::Lazy(lazy) => lazy.loaded(),
        }
    }

    /// Resolve the view, awaiting the lazy fetch if needed
    pub async fn resolve(&self) -> Result<ViewHandle, LoadError> {
        match self {
            Component::Eager(view) => Ok(view.clone()),
            Component::Lazy(lazy) => lazy.load().await,
        }
    }
}

/// Registry of components by name
///
/// Route manifests refer to components by name; the registry turns those
/// names into eager or lazy components. A lazy component registered once is
/// shared by every route that names it, so it loads at most once.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    components: HashMap<String, Component>,
}

impl ViewRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view that is available immediately
    pub fn register_eager(&mut self, view: impl View + 'static) {
        let component = Component::eager(view);
        self.components
            .insert(component.name().to_string(), component);
    }

    /// Register a view that is loaded on demand
    pub fn register_lazy(&mut self, name: impl Into<String>, loader: impl ViewLoader + 'static) {
        let component = Component::lazy(name, loader);
        self.components
            .insert(component.name().to_string(), component);
    }

    /// Look up a component by name
    pub fn component(&self, name: &str) -> Option<Component> {
        self.components.get(name).cloned()
    }

    /// All registered component names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
