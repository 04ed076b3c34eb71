//! Route table of the problem-set application

use super::pages::DEFAULT_LAYOUT;
use waypoint_core::{Component, ConfigError, RouteEntry, RouteTable, ViewRegistry};

/// Declared routes, in match order
pub fn app_routes(views: &ViewRegistry) -> Result<Vec<RouteEntry>, ConfigError> {
    let view = |name: &str| {
        views
            .component(name)
            .ok_or_else(|| ConfigError::UnknownComponent {
                name: name.to_string(),
            })
    };

    Ok(vec![
        // Pages without the shared layout
        RouteEntry::named("/", "LandingPage", view("LandingPage")?),
        RouteEntry::named("/editor", "Editor", view("Editor")?),
        RouteEntry::named("/exam", "ExamEnvironment", view("ExamEnvironment")?),
        // Pages inside DefaultLayout
        RouteEntry::new("/", view(DEFAULT_LAYOUT)?).with_children(vec![
            RouteEntry::named("home", "Home", view("MainContent")?),
            RouteEntry::named("my-problems", "MyProblems", view("MyProblems")?),
            RouteEntry::named("my-problem-sets", "MyProblemSets", view("MyProblemSets")?),
            RouteEntry::named(
                "my-custom-problems",
                "MyCustomProblems",
                view("MyCustomProblems")?,
            ),
            RouteEntry::named("problem-board", "ProblemBoard", view("ProblemBoard")?),
            RouteEntry::named(
                "problem-set-board",
                "ProblemSetBoard",
                view("ProblemSetBoard")?,
            ),
            RouteEntry::named("review-board", "ReviewBoard", view("ReviewBoard")?),
            RouteEntry::named("exam-room", "ExamRoom", view("ExamRoom")?),
            RouteEntry::named("exam-history", "ExamHistory", view("ExamHistory")?),
            RouteEntry::named(
                "problem-set-board/:problemSetId",
                "ProblemSetBoardDetail",
                view("ProblemSetBoardDetail")?,
            ),
        ]),
    ])
}

/// Build the validated application table
pub fn app_table(views: &ViewRegistry) -> Result<RouteTable, ConfigError> {
    RouteTable::new(app_routes(views)?)
}

/// Whether a component is the shared layout shell
pub fn is_default_layout(component: &Component) -> bool {
    component.name() == DEFAULT_LAYOUT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pages::registry;
    use std::sync::Arc;
    use waypoint_core::{
        HistoryMode, NavigationError, Params, RouteMatch, RouteName, Router, StaticView,
    };

    const LAYOUT_PATHS: &[&str] = &[
        "/home",
        "/my-problems",
        "/my-problem-sets",
        "/my-custom-problems",
        "/problem-board",
        "/problem-set-board",
        "/review-board",
        "/exam-room",
        "/exam-history",
    ];

    fn table() -> RouteTable {
        app_table(&registry()).expect("application table is valid")
    }

    fn name_of(matched: &RouteMatch) -> &str {
        matched.name().map(RouteName::as_str).unwrap_or("")
    }

    #[test]
    fn test_root_is_landing_page() {
        let matched = table().resolve("/").unwrap();
        assert_eq!(name_of(&matched), "LandingPage");
        assert!(matched.ancestors.is_empty());
        assert_eq!(matched.route.component.name(), "LandingPage");
    }

    #[test]
    fn test_full_screen_pages_have_no_layout() {
        let table = table();
        for (path, name) in [("/editor", "Editor"), ("/exam", "ExamEnvironment")] {
            let matched = table.resolve(path).unwrap();
            assert_eq!(name_of(&matched), name);
            assert!(matched.layout().is_none(), "{} should not be wrapped", path);
            assert!(matched.route.component.is_lazy());
        }
    }

    #[test]
    fn test_layout_pages_share_default_layout() {
        let table = table();
        for path in LAYOUT_PATHS {
            let matched = table.resolve(path).unwrap();
            let layout = matched.layout().expect("wrapped in a layout");
            assert!(is_default_layout(&layout.component), "{} has wrong root", path);
            assert_eq!(matched.ancestors.len(), 1);
        }
    }

    #[test]
    fn test_problem_set_detail_param() {
        let table = table();
        let matched = table.resolve("/problem-set-board/42").unwrap();
        assert_eq!(name_of(&matched), "ProblemSetBoardDetail");
        assert_eq!(matched.param("problemSetId"), Some("42"));
        assert!(is_default_layout(&matched.layout().unwrap().component));

        let matched = table.resolve("/problem-set-board/weekly%20drills").unwrap();
        assert_eq!(matched.param("problemSetId"), Some("weekly drills"));
    }

    #[test]
    fn test_empty_param_does_not_match_detail() {
        let table = table();
        match table.resolve("/problem-set-board/") {
            Ok(matched) => assert_ne!(name_of(&matched), "ProblemSetBoardDetail"),
            Err(e) => assert!(matches!(e, NavigationError::NotFound { .. })),
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert!(matches!(
            table().resolve("/settings"),
            Err(NavigationError::NotFound { .. })
        ));
    }

    #[test]
    fn test_names_are_unique() {
        let table = table();
        let names = table.names();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn test_href_round_trip() {
        let table = table();
        for name in table.names() {
            let record = table.get(name.as_str()).unwrap();
            let mut params = Params::new();
            for param in record.pattern.params() {
                params.insert(param.to_string(), "7".to_string());
            }

            let url = table.href(name.as_str(), &params).unwrap();
            let matched = table.resolve(&url).unwrap();
            assert_eq!(matched.name(), Some(name), "round trip of {}", url);
        }
    }

    #[test]
    fn test_href_requires_problem_set_id() {
        assert!(matches!(
            table().href("ProblemSetBoardDetail", &Params::new()),
            Err(NavigationError::MissingParam { .. })
        ));
        assert!(matches!(
            table().href("Dashboard", &Params::new()),
            Err(NavigationError::UnknownRoute { .. })
        ));
    }

    #[test]
    fn test_adding_second_root_page_is_rejected() {
        let views = registry();
        let mut routes = app_routes(&views).unwrap();
        routes.push(RouteEntry::named(
            "/",
            "SecondLanding",
            Component::eager(StaticView::page("SecondLanding")),
        ));
        assert!(matches!(
            RouteTable::new(routes),
            Err(ConfigError::DuplicatePath { .. })
        ));
    }

    #[tokio::test]
    async fn test_router_loads_lazy_editor_once() {
        let router = Router::new(
            Arc::new(table()),
            waypoint_core::create_history(HistoryMode::web("/")),
        );

        let navigation = router.push("/editor").await.unwrap();
        assert_eq!(navigation.views.len(), 1);
        assert_eq!(navigation.page().map(|v| v.name()), Some("Editor"));

        router.push("/home").await.unwrap();
        let navigation = router.back().await.unwrap();
        assert_eq!(navigation.route.full_path(), "/editor");
        assert!(navigation.route.route.component.ready().is_some());
    }
}
