//! Page views of the problem-set application
//!
//! Pages only describe themselves; what each page does lives outside the
//! route table. The editor and the exam environment are heavy full-screen
//! views and are loaded on first navigation.

use std::any::Any;
use std::sync::Arc;
use tracing::debug;
use waypoint_core::{LoadError, View, ViewHandle, ViewKind, ViewRegistry};

/// Component name of the shared layout shell
pub const DEFAULT_LAYOUT: &str = "DefaultLayout";

/// A descriptive page view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    name: &'static str,
    title: &'static str,
    summary: &'static str,
    kind: ViewKind,
}

impl Page {
    const fn page(name: &'static str, title: &'static str, summary: &'static str) -> Self {
        Self {
            name,
            title,
            summary,
            kind: ViewKind::Page,
        }
    }

    const fn layout(name: &'static str, title: &'static str, summary: &'static str) -> Self {
        Self {
            name,
            title,
            summary,
            kind: ViewKind::Layout,
        }
    }

    /// One-line description shown when the page is mounted
    pub fn summary(&self) -> &'static str {
        self.summary
    }

    pub fn handle(self) -> ViewHandle {
        Arc::new(self)
    }
}

impl View for Page {
    fn name(&self) -> &str {
        self.name
    }

    fn title(&self) -> &str {
        self.title
    }

    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Views bound when the table is built
const EAGER_PAGES: &[Page] = &[
    Page::layout(
        DEFAULT_LAYOUT,
        "Problem Studio",
        "Shared navigation and frame around the workspace pages",
    ),
    Page::page("LandingPage", "Welcome", "Start solving, building and sharing problem sets"),
    Page::page("MainContent", "Home", "Recent activity and recommended problem sets"),
    Page::page("MyProblems", "My Problems", "Problems you have solved or bookmarked"),
    Page::page("MyProblemSets", "My Problem Sets", "Problem sets you created or saved"),
    Page::page("MyCustomProblems", "My Custom Problems", "Problems you authored"),
    Page::page("ProblemBoard", "Problem Board", "Browse every published problem"),
    Page::page("ProblemSetBoard", "Problem Set Board", "Browse every published problem set"),
    Page::page("ProblemSetBoardDetail", "Problem Set", "Details and problems of one problem set"),
    Page::page("ReviewBoard", "Review Board", "Review notes on problems you got wrong"),
    Page::page("ExamRoom", "Exam Room", "Scheduled exams you can join"),
    Page::page("ExamHistory", "Exam History", "Results of exams you have taken"),
];

/// Views fetched on first navigation
const LAZY_PAGES: &[Page] = &[
    Page::page("Editor", "Editor", "Full-screen problem editor"),
    Page::page("ExamEnvironment", "Exam", "Full-screen exam environment"),
];

/// Registry of every component the application table refers to
pub fn registry() -> ViewRegistry {
    let mut registry = ViewRegistry::new();

    for page in EAGER_PAGES {
        registry.register_eager(*page);
    }

    for page in LAZY_PAGES.iter().copied() {
        registry.register_lazy(page.name, move || async move {
            debug!("Fetching view {}", page.name);
            Ok::<ViewHandle, LoadError>(page.handle())
        });
    }

    registry
}

/// Summary of a mounted view, if it is one of ours
pub fn summary_of(view: &ViewHandle) -> Option<&'static str> {
    view.as_any().downcast_ref::<Page>().map(Page::summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contains_all_pages() {
        let registry = registry();
        assert_eq!(registry.len(), EAGER_PAGES.len() + LAZY_PAGES.len());

        for name in ["Editor", "ExamEnvironment"] {
            assert!(registry.component(name).unwrap().is_lazy(), "{} should be lazy", name);
        }
        for name in ["LandingPage", DEFAULT_LAYOUT, "ProblemSetBoardDetail"] {
            assert!(!registry.component(name).unwrap().is_lazy(), "{} should be eager", name);
        }
    }

    #[tokio::test]
    async fn test_lazy_page_loads() {
        let editor = registry().component("Editor").unwrap();
        assert!(editor.ready().is_none());

        let view = editor.resolve().await.unwrap();
        assert_eq!(view.name(), "Editor");
        assert_eq!(summary_of(&view), Some("Full-screen problem editor"));
        assert!(editor.ready().is_some());
    }

    #[test]
    fn test_layout_kind() {
        let layout = registry().component(DEFAULT_LAYOUT).unwrap();
        assert_eq!(layout.ready().unwrap().kind(), ViewKind::Layout);
    }
}
