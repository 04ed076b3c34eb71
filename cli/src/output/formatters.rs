//! Text formatting for route tables and matches

use colored::Colorize;
use waypoint_core::route::RouteRecord;
use waypoint_core::{HistoryMode, Navigation, Params, RouteMatch, RouteTable, ViewKind};

/// Render the route tree, one record per line, children indented under their parent
pub fn format_route_tree(table: &RouteTable, mode: &HistoryMode) -> String {
    let mut lines = Vec::new();
    for root in table.roots() {
        push_record(table, root, mode, &mut lines);
    }
    lines.join("\n")
}

fn push_record(table: &RouteTable, record: &RouteRecord, mode: &HistoryMode, lines: &mut Vec<String>) {
    let indent = "  ".repeat(record.depth);
    let loading = if record.component.is_lazy() {
        "lazy".yellow()
    } else {
        "eager".green()
    };
    let name = match &record.name {
        Some(name) => name.to_string().bold(),
        None => "(layout)".dimmed(),
    };

    let mut line = format!(
        "{}{:<36} {} -> {} [{}]",
        indent,
        record.pattern.to_string(),
        name,
        record.component.name().cyan(),
        loading
    );
    if record.is_matchable() && record.pattern.params().next().is_none() {
        if let Ok(path) = record.pattern.build(record.label(), &Params::new()) {
            line.push_str(&format!("  {}", mode.href(&path).dimmed()));
        }
    }
    lines.push(line);

    for child in table.children(record) {
        push_record(table, child, mode, lines);
    }
}

/// Render a resolved match: the chain outermost first, then params, query and hash
pub fn format_match(matched: &RouteMatch) -> String {
    let mut lines = vec![format!(
        "{} {}",
        "Matched".green().bold(),
        matched
            .name()
            .map(|name| name.to_string())
            .unwrap_or_else(|| "(unnamed)".to_string())
    )];

    for (depth, level) in matched.chain().enumerate() {
        let marker = if depth == matched.ancestors.len() {
            "page"
        } else {
            "layout"
        };
        lines.push(format!(
            "{}{} {} ({})",
            "  ".repeat(depth + 1),
            level.path,
            level.component.name().cyan(),
            marker
        ));
    }

    for (key, value) in &matched.params {
        lines.push(format!("  {} {} = {}", "param".yellow(), key, value));
    }
    for (key, value) in &matched.location.query {
        lines.push(format!("  {} {} = {}", "query".yellow(), key, value));
    }
    if let Some(hash) = &matched.location.hash {
        lines.push(format!("  {} #{}", "hash".yellow(), hash));
    }

    lines.join("\n")
}

/// One-line description of a committed navigation
pub fn format_navigation(navigation: &Navigation) -> String {
    let views: Vec<String> = navigation
        .views
        .iter()
        .map(|view| match view.kind() {
            ViewKind::Layout => format!("{} >", view.title()),
            ViewKind::Page => view.title().to_string(),
        })
        .collect();
    format!("{}  {}", navigation.href, views.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{app_table, registry};

    #[test]
    fn test_route_tree_lists_every_record() {
        let table = app_table(&registry()).unwrap();
        let tree = format_route_tree(&table, &HistoryMode::web("/"));

        assert_eq!(tree.lines().count(), table.len());
        assert!(tree.contains("ProblemSetBoardDetail"));
        assert!(tree.contains("/problem-set-board/:problemSetId"));
        assert!(tree.contains("lazy"));
        assert!(tree.contains("(layout)"));
    }

    #[test]
    fn test_match_shows_chain_and_params() {
        let table = app_table(&registry()).unwrap();
        let matched = table.resolve("/problem-set-board/42?tab=info").unwrap();
        let text = format_match(&matched);

        assert!(text.contains("ProblemSetBoardDetail"));
        assert!(text.contains("DefaultLayout"));
        assert!(text.contains("problemSetId = 42"));
        assert!(text.contains("tab = info"));
    }
}
