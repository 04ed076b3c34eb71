//! Plain snapshots of router state for the browser to render

use crate::app::summary_of;
use waypoint_core::{Navigation, Params, RouteTable};

/// Placeholder value for parameters when a menu entry is generated
const SAMPLE_PARAM: &str = "1";

/// What the browser shows for one committed navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub href: String,
    pub route: String,
    /// Layout titles, outermost first
    pub layouts: Vec<String>,
    pub title: String,
    pub summary: String,
    pub params: Vec<(String, String)>,
    pub visited_at: String,
}

impl Screen {
    pub fn from_navigation(navigation: &Navigation) -> Self {
        let page = navigation.page();
        Self {
            href: navigation.href.clone(),
            route: navigation
                .route
                .name()
                .map(|name| name.to_string())
                .unwrap_or_default(),
            layouts: navigation
                .layouts()
                .iter()
                .map(|view| view.title().to_string())
                .collect(),
            title: page.map(|view| view.title().to_string()).unwrap_or_default(),
            summary: page
                .and_then(summary_of)
                .map(str::to_string)
                .unwrap_or_default(),
            params: navigation
                .route
                .params
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            visited_at: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }

    /// Whether the page is mounted inside a layout
    pub fn in_layout(&self) -> bool {
        !self.layouts.is_empty()
    }
}

/// A route the browser menu can open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub path: String,
}

/// One entry per named route, in declaration order.
/// Parameterized routes are filled with a sample value.
pub fn menu_entries(table: &RouteTable) -> Vec<MenuEntry> {
    table
        .records()
        .iter()
        .filter(|record| record.is_matchable())
        .filter_map(|record| {
            let params: Params = record
                .pattern
                .params()
                .map(|param| (param.to_string(), SAMPLE_PARAM.to_string()))
                .collect();
            let path = record.pattern.build(record.label(), &params).ok()?;

            let label = if params.is_empty() {
                record.label().to_string()
            } else {
                let filled: Vec<String> = params
                    .iter()
                    .map(|(key, value)| format!("{}={}", key, value))
                    .collect();
                format!("{} ({})", record.label(), filled.join(", "))
            };
            Some(MenuEntry { label, path })
        })
        .collect()
}
