//! Router implementation for managing navigation state
//!
//! The router owns a shared [`RouteTable`] and a [`History`]. A navigation
//! resolves its target, awaits every lazy component along the match chain and
//! only then commits. Each navigation takes a ticket when it starts; if a newer
//! navigation has started by the time the components are ready, the older one
//! is dropped with [`NavigationError::Superseded`] and never commits.

use crate::config::RouterSettings;
use crate::error::{NavigationError, Result};
use crate::history::History;
use crate::route::{Params, RouteMatch, RouteName, RouteTable};
use crate::view::ViewHandle;
use futures::future::try_join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Where to navigate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// A URL path, optionally with query and hash
    Path(String),
    /// A named route with parameter bindings and query pairs
    Named {
        name: RouteName,
        params: Params,
        query: Vec<(String, String)>,
    },
}

impl NavigationTarget {
    /// Target a named route
    pub fn named(name: impl Into<RouteName>) -> Self {
        NavigationTarget::Named {
            name: name.into(),
            params: Params::new(),
            query: Vec::new(),
        }
    }

    /// Bind a parameter. Ignored for path targets.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let NavigationTarget::Named { params, .. } = &mut self {
            params.insert(key.into(), value.into());
        }
        self
    }

    /// Add a query pair. Ignored for path targets.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let NavigationTarget::Named { query, .. } = &mut self {
            query.push((key.into(), value.into()));
        }
        self
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        NavigationTarget::Path(path.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        NavigationTarget::Path(path)
    }
}

/// Result of a committed navigation
#[derive(Debug, Clone)]
pub struct Navigation {
    /// The resolved route
    pub route: RouteMatch,
    /// Mounted views, outermost layout first
    pub views: Vec<ViewHandle>,
    /// Location as the history mode writes it
    pub href: String,
    /// True when the target was already the current location
    pub duplicated: bool,
}

impl Navigation {
    /// The view of the matched route itself
    pub fn page(&self) -> Option<&ViewHandle> {
        self.views.last()
    }

    /// Views wrapping the page, outermost first
    pub fn layouts(&self) -> &[ViewHandle] {
        match self.views.split_last() {
            Some((_, layouts)) => layouts,
            None => &[],
        }
    }
}

/// How a navigation is recorded once it commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Commit {
    Push,
    Replace,
    Traverse(isize),
}

/// Current state of the router
#[derive(Debug)]
struct RouterState {
    history: History,
    current: Option<RouteMatch>,
}

/// Create a router from a table and a history
pub fn create_router(table: Arc<RouteTable>, history: History) -> Router {
    Router::new(table, history)
}

/// Main router struct that manages navigation state over a shared table
#[derive(Debug)]
pub struct Router {
    table: Arc<RouteTable>,
    state: Mutex<RouterState>,
    ticket: AtomicU64,
}

impl Router {
    /// Create a router from a table and a history
    pub fn new(table: Arc<RouteTable>, history: History) -> Self {
        debug!(
            "Creating router: {} routes, {} history",
            table.len(),
            history.mode().kind()
        );
        Self {
            table,
            state: Mutex::new(RouterState {
                history,
                current: None,
            }),
            ticket: AtomicU64::new(0),
        }
    }

    /// Create a router whose history follows the given settings
    pub fn with_settings(table: Arc<RouteTable>, settings: &RouterSettings) -> Self {
        Self::new(table, settings.create_history())
    }

    /// The route table
    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    fn state(&self) -> MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve a target without navigating
    pub fn resolve(&self, target: &NavigationTarget) -> Result<RouteMatch> {
        let route = match target {
            NavigationTarget::Path(path) => self.table.resolve(path)?,
            NavigationTarget::Named {
                name,
                params,
                query,
            } => self.table.resolve_named(name.as_str(), params, query.clone())?,
        };
        Ok(route)
    }

    /// Location a target would be written as, with the history mode applied
    pub fn href(&self, target: &NavigationTarget) -> Result<String> {
        let route = self.resolve(target)?;
        Ok(self.state().history.mode().href(&route.full_path()))
    }

    /// Navigate to a target, adding a history entry
    pub async fn push(&self, target: impl Into<NavigationTarget>) -> Result<Navigation> {
        self.navigate(target.into(), Commit::Push).await
    }

    /// Navigate to a target, replacing the current history entry
    pub async fn replace(&self, target: impl Into<NavigationTarget>) -> Result<Navigation> {
        self.navigate(target.into(), Commit::Replace).await
    }

    /// Navigate to a location as the history mode writes it (`/#/home` in hash mode)
    pub async fn push_location(&self, location: &str) -> Result<Navigation> {
        let path = self.state().history.mode().strip(location)?;
        self.push(path).await
    }

    /// Go back one entry
    pub async fn back(&self) -> Result<Navigation> {
        self.go(-1).await
    }

    /// Go forward one entry
    pub async fn forward(&self) -> Result<Navigation> {
        self.go(1).await
    }

    /// Move `delta` entries through history
    pub async fn go(&self, delta: isize) -> Result<Navigation> {
        let path = self
            .state()
            .history
            .peek(delta)
            .map(str::to_string)
            .ok_or(NavigationError::NoHistory)?;
        self.navigate(NavigationTarget::Path(path), Commit::Traverse(delta))
            .await
    }

    pub fn can_go_back(&self) -> bool {
        self.state().history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.state().history.can_go_forward()
    }

    /// The committed route, if any navigation has completed
    pub fn current(&self) -> Option<RouteMatch> {
        self.state().current.clone()
    }

    /// The committed location as the history mode writes it
    pub fn current_location(&self) -> Option<String> {
        self.state().history.location()
    }

    async fn navigate(&self, target: NavigationTarget, commit: Commit) -> Result<Navigation> {
        let ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;

        let route = self.resolve(&target)?;
        let full_path = route.full_path();
        debug!("Navigation #{} to '{}' started", ticket, full_path);

        // Single suspension point: lazy components along the chain
        let views = match try_join_all(route.components().map(|component| component.resolve())).await {
            Ok(views) => views,
            Err(e) => {
                warn!("Navigation #{} to '{}' failed to load: {}", ticket, full_path, e);
                return Err(e.into());
            }
        };

        let mut state = self.state();

        if self.ticket.load(Ordering::SeqCst) != ticket {
            debug!("Navigation #{} to '{}' superseded", ticket, full_path);
            return Err(NavigationError::Superseded { path: full_path }.into());
        }

        let duplicated = commit == Commit::Push && state.history.current() == Some(full_path.as_str());
        if !duplicated {
            match commit {
                Commit::Push => state.history.push(full_path.clone()),
                Commit::Replace => state.history.replace(full_path.clone()),
                Commit::Traverse(delta) => {
                    state.history.go(delta)?;
                }
            }
            info!(
                "Navigated to '{}' ({})",
                full_path,
                route.name().map(RouteName::as_str).unwrap_or("unnamed")
            );
        }

        state.current = Some(route.clone());
        let href = state.history.mode().href(&full_path);

        Ok(Navigation {
            route,
            views,
            href,
            duplicated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, LoadError};
    use crate::history::HistoryMode;
    use crate::route::RouteEntry;
    use crate::view::{Component, StaticView};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn page(name: &str) -> Component {
        Component::eager(StaticView::page(name))
    }

    fn router_with(entries: Vec<RouteEntry>, mode: HistoryMode) -> Router {
        let table = RouteTable::new(entries).expect("valid table");
        Router::new(Arc::new(table), History::new(mode))
    }

    fn basic_router() -> Router {
        router_with(
            vec![
                RouteEntry::named("/", "Landing", page("Landing")),
                RouteEntry::new("/", Component::eager(StaticView::layout("Shell"))).with_children(vec![
                    RouteEntry::named("home", "Home", page("Home")),
                    RouteEntry::named("sets/:id", "Set", page("Set")),
                ]),
            ],
            HistoryMode::memory(),
        )
    }

    #[tokio::test]
    async fn test_push_mounts_layout_and_page() {
        let router = basic_router();
        let navigation = router.push("/sets/12").await.unwrap();

        assert_eq!(navigation.route.param("id"), Some("12"));
        assert_eq!(navigation.layouts().len(), 1);
        assert_eq!(navigation.layouts()[0].name(), "Shell");
        assert_eq!(navigation.page().map(|v| v.name()), Some("Set"));
        assert!(!navigation.duplicated);
        assert_eq!(
            router.current().and_then(|m| m.name().cloned()),
            Some(RouteName::from("Set"))
        );
    }

    #[tokio::test]
    async fn test_push_named_target() {
        let router = basic_router();
        let target = NavigationTarget::named("Set").param("id", "a b").query("tab", "info");
        let navigation = router.push(target).await.unwrap();
        assert_eq!(navigation.href, "/sets/a%20b?tab=info");
        assert_eq!(navigation.route.param("id"), Some("a b"));
    }

    #[tokio::test]
    async fn test_unknown_path_does_not_commit() {
        let router = basic_router();
        router.push("/home").await.unwrap();

        let result = router.push("/nowhere").await;
        assert!(matches!(
            result,
            Err(Error::Navigation(NavigationError::NotFound { .. }))
        ));
        assert_eq!(router.current().unwrap().full_path(), "/home");
    }

    #[tokio::test]
    async fn test_duplicate_navigation() {
        let router = basic_router();
        router.push("/home").await.unwrap();
        let navigation = router.push("/home").await.unwrap();
        assert!(navigation.duplicated);
        assert!(!router.can_go_back());
    }

    #[tokio::test]
    async fn test_back_and_forward() {
        let router = basic_router();
        router.push("/").await.unwrap();
        router.push("/home").await.unwrap();
        router.push("/sets/1").await.unwrap();

        let navigation = router.back().await.unwrap();
        assert_eq!(navigation.route.full_path(), "/home");
        assert!(router.can_go_forward());

        let navigation = router.forward().await.unwrap();
        assert_eq!(navigation.route.full_path(), "/sets/1");

        router.go(-2).await.unwrap();
        assert_eq!(router.current().unwrap().full_path(), "/");
        assert!(matches!(
            router.back().await,
            Err(Error::Navigation(NavigationError::NoHistory))
        ));
    }

    #[tokio::test]
    async fn test_replace_keeps_history_length() {
        let router = basic_router();
        router.push("/").await.unwrap();
        router.replace("/home").await.unwrap();
        assert!(!router.can_go_back());
        assert_eq!(router.current_location().as_deref(), Some("/home"));
    }

    #[tokio::test]
    async fn test_hash_mode_locations() {
        let router = router_with(
            vec![RouteEntry::named("/exam-room", "ExamRoom", page("ExamRoom"))],
            HistoryMode::hash("/"),
        );
        let navigation = router.push_location("/#/exam-room").await.unwrap();
        assert_eq!(navigation.href, "/#/exam-room");
        assert_eq!(
            router.href(&NavigationTarget::named("ExamRoom")).unwrap(),
            "/#/exam-room"
        );
    }

    #[tokio::test]
    async fn test_newer_navigation_supersedes_pending_load() {
        let gate = Arc::new(Notify::new());
        let release = gate.clone();
        let slow = Component::lazy("Editor", move || {
            let gate = gate.clone();
            async move {
                gate.notified().await;
                Ok(StaticView::page("Editor").handle())
            }
        });

        let router = Arc::new(router_with(
            vec![
                RouteEntry::named("/editor", "Editor", slow),
                RouteEntry::named("/exam", "Exam", page("Exam")),
            ],
            HistoryMode::memory(),
        ));

        let pending = tokio::spawn({
            let router = router.clone();
            async move { router.push("/editor").await }
        });

        // Let the slow navigation reach its suspension point
        tokio::time::sleep(Duration::from_millis(20)).await;
        router.push("/exam").await.unwrap();
        release.notify_one();

        let stale = pending.await.unwrap();
        assert!(stale.unwrap_err().is_superseded());
        assert_eq!(router.current().unwrap().full_path(), "/exam");
        assert!(!router.can_go_back());
    }

    #[tokio::test]
    async fn test_lazy_load_failure_surfaces_and_retries() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let flaky = Component::lazy("Exam", move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(LoadError::Failed {
                        view: "Exam".to_string(),
                        message: "connection reset".to_string(),
                    })
                } else {
                    Ok(StaticView::page("Exam").handle())
                }
            }
        });
        let router = router_with(
            vec![RouteEntry::named("/exam", "Exam", flaky)],
            HistoryMode::memory(),
        );

        assert!(matches!(router.push("/exam").await, Err(Error::Load(_))));
        assert!(router.current().is_none());

        router.push("/exam").await.unwrap();
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
