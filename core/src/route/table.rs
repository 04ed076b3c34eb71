//! The route table
//!
//! The table is built once from declared [`RouteEntry`] trees and is
//! immutable afterwards. Entries are flattened in depth-first declaration
//! order, so resolution walks them in the order they were written.

use super::entry::{RouteEntry, RouteName};
use super::location::Location;
use super::pattern::{split_path, Params, PathPattern};
use crate::error::{ConfigError, NavigationError};
use crate::view::Component;
use std::collections::HashMap;
use tracing::{debug, trace};

/// A flattened route with its effective (joined) path pattern
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub name: Option<RouteName>,
    /// Path as declared on the entry
    pub path: String,
    /// Parent and child segments joined
    pub pattern: PathPattern,
    pub component: Component,
    pub meta: HashMap<String, String>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub depth: usize,
}

impl RouteRecord {
    /// Leaves and named parents can be the target of a navigation.
    /// An unnamed parent only wraps its children.
    pub fn is_matchable(&self) -> bool {
        self.children.is_empty() || self.name.is_some()
    }

    pub fn is_layout(&self) -> bool {
        !self.children.is_empty()
    }

    /// Name if present, otherwise the component name
    pub fn label(&self) -> &str {
        self.name
            .as_ref()
            .map(RouteName::as_str)
            .unwrap_or_else(|| self.component.name())
    }
}

/// One level of a match chain
#[derive(Debug, Clone)]
pub struct MatchedRoute {
    pub name: Option<RouteName>,
    /// Effective pattern, e.g. `/problem-set-board/:problemSetId`
    pub path: String,
    pub component: Component,
    pub meta: HashMap<String, String>,
}

impl MatchedRoute {
    fn from_record(record: &RouteRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.pattern.to_string(),
            component: record.component.clone(),
            meta: record.meta.clone(),
        }
    }
}

/// Result of resolving a URL or a named location
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// Parents of the matched route, outermost first
    pub ancestors: Vec<MatchedRoute>,
    /// The matched route itself
    pub route: MatchedRoute,
    /// Decoded parameter values
    pub params: Params,
    /// The resolved location
    pub location: Location,
}

impl RouteMatch {
    /// Name of the matched route
    pub fn name(&self) -> Option<&RouteName> {
        self.route.name.as_ref()
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Outermost layout wrapping the matched route, if any
    pub fn layout(&self) -> Option<&MatchedRoute> {
        self.ancestors.first()
    }

    /// The whole chain from the outermost ancestor down to the matched route
    pub fn chain(&self) -> impl Iterator<Item = &MatchedRoute> {
        self.ancestors.iter().chain(std::iter::once(&self.route))
    }

    /// Components to mount, outermost first
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.chain().map(|matched| &matched.component)
    }

    pub fn full_path(&self) -> String {
        self.location.full_path()
    }
}

/// Immutable route table
#[derive(Debug, Clone)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
    by_name: HashMap<RouteName, usize>,
    roots: Vec<usize>,
}

impl RouteTable {
    /// Build and validate a table.
    ///
    /// Fails on duplicate names, malformed patterns, relative top-level paths,
    /// absolute child paths and on two routes claiming the same URLs.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, ConfigError> {
        let mut table = Self {
            records: Vec::new(),
            by_name: HashMap::new(),
            roots: Vec::new(),
        };

        for entry in entries {
            let pattern = PathPattern::parse(&entry.path)?;
            if !pattern.is_absolute() {
                return Err(ConfigError::MalformedPath {
                    path: entry.path.clone(),
                    reason: "top-level routes must use absolute paths".to_string(),
                });
            }
            let index = table.add(entry, pattern, None, 0)?;
            table.roots.push(index);
        }

        table.check_claims()?;

        debug!(
            "Built route table: {} records, {} named",
            table.records.len(),
            table.by_name.len()
        );
        Ok(table)
    }

    fn add(
        &mut self,
        entry: RouteEntry,
        pattern: PathPattern,
        parent: Option<usize>,
        depth: usize,
    ) -> Result<usize, ConfigError> {
        let index = self.records.len();

        if let Some(name) = &entry.name {
            if self.by_name.insert(name.clone(), index).is_some() {
                return Err(ConfigError::DuplicateName {
                    name: name.to_string(),
                });
            }
        }

        self.records.push(RouteRecord {
            name: entry.name,
            path: entry.path,
            pattern: pattern.clone(),
            component: entry.component,
            meta: entry.meta,
            parent,
            children: Vec::new(),
            depth,
        });

        for child in entry.children {
            let child_pattern = pattern.join(&PathPattern::parse(&child.path)?)?;
            let child_index = self.add(child, child_pattern, Some(index), depth + 1)?;
            self.records[index].children.push(child_index);
        }

        Ok(index)
    }

    /// Two matchable routes may not claim the same URLs. A layout parent may
    /// share its own path with a route, since it never matches on its own.
    fn check_claims(&self) -> Result<(), ConfigError> {
        let mut claims: HashMap<String, usize> = HashMap::new();

        for (index, record) in self.records.iter().enumerate() {
            if !record.is_matchable() {
                continue;
            }
            if let Some(&first) = claims.get(&record.pattern.shape()) {
                return Err(ConfigError::DuplicatePath {
                    path: record.pattern.to_string(),
                    first: self.records[first].label().to_string(),
                    second: record.label().to_string(),
                });
            }
            claims.insert(record.pattern.shape(), index);
        }

        for record in self.records.iter().filter(|r| !r.is_matchable()) {
            if let Some(&claimant) = claims.get(&record.pattern.shape()) {
                debug!(
                    "Layout '{}' shares path '{}' with route '{}'",
                    record.label(),
                    record.pattern,
                    self.records[claimant].label()
                );
            }
        }

        Ok(())
    }

    /// Reject tables without a catch-all route
    pub fn require_catch_all(self) -> Result<Self, ConfigError> {
        if self.has_catch_all() {
            Ok(self)
        } else {
            Err(ConfigError::MissingCatchAll)
        }
    }

    /// Whether some route matches every otherwise unmatched path
    pub fn has_catch_all(&self) -> bool {
        self.records
            .iter()
            .any(|record| record.is_matchable() && record.pattern.is_catch_all())
    }

    /// Resolve a URL (`/problem-set-board/42?tab=info`) to a match chain
    pub fn resolve(&self, url: &str) -> Result<RouteMatch, NavigationError> {
        self.resolve_location(Location::parse(url)?)
    }

    /// Resolve an already parsed location.
    ///
    /// Every matchable route is tried in declaration order. The most specific
    /// match wins (literal over parameter over catch-all); ties go to the
    /// route declared first.
    pub fn resolve_location(&self, location: Location) -> Result<RouteMatch, NavigationError> {
        let segments = split_path(&location.path);
        let mut best: Option<(Vec<u8>, usize, Params)> = None;

        for (index, record) in self.records.iter().enumerate() {
            if !record.is_matchable() {
                continue;
            }
            let Some(params) = record.pattern.match_segments(&segments) else {
                continue;
            };

            let specificity = record.pattern.specificity();
            trace!("'{}' matches route '{}'", location.path, record.label());
            let better = match &best {
                Some((current, _, _)) => specificity > *current,
                None => true,
            };
            if better {
                best = Some((specificity, index, params));
            }
        }

        match best {
            Some((_, index, params)) => Ok(self.build_match(index, params, location)),
            None => Err(NavigationError::NotFound {
                path: location.path,
            }),
        }
    }

    /// Resolve a named route with parameter bindings
    pub fn resolve_named(
        &self,
        name: &str,
        params: &Params,
        query: Vec<(String, String)>,
    ) -> Result<RouteMatch, NavigationError> {
        let index = self.index_of(name)?;
        let path = self.build_path(index, params)?;
        let location = Location {
            path,
            query,
            hash: None,
        };
        Ok(self.build_match(index, params.clone(), location))
    }

    /// Build the concrete path for a named route.
    ///
    /// Fails if the name is unknown, a required parameter is missing or
    /// empty, or a parameter is supplied that the route does not declare.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, NavigationError> {
        let index = self.index_of(name)?;
        self.build_path(index, params)
    }

    fn build_path(&self, index: usize, params: &Params) -> Result<String, NavigationError> {
        let record = &self.records[index];
        let label = record.label();

        let declared: Vec<&str> = record.pattern.params().collect();
        if let Some(extra) = params.keys().find(|key| !declared.contains(&key.as_str())) {
            return Err(NavigationError::UnknownParam {
                route: label.to_string(),
                param: extra.clone(),
            });
        }

        record.pattern.build(label, params)
    }

    fn index_of(&self, name: &str) -> Result<usize, NavigationError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| NavigationError::UnknownRoute {
                name: name.to_string(),
            })
    }

    fn build_match(&self, index: usize, params: Params, location: Location) -> RouteMatch {
        let mut ancestors = Vec::new();
        let mut parent = self.records[index].parent;
        while let Some(parent_index) = parent {
            let record = &self.records[parent_index];
            ancestors.push(MatchedRoute::from_record(record));
            parent = record.parent;
        }
        ancestors.reverse();

        RouteMatch {
            ancestors,
            route: MatchedRoute::from_record(&self.records[index]),
            params,
            location,
        }
    }

    /// All route names in declaration order
    pub fn names(&self) -> Vec<&RouteName> {
        self.records
            .iter()
            .filter_map(|record| record.name.as_ref())
            .collect()
    }

    /// Look up a route by name
    pub fn get(&self, name: &str) -> Option<&RouteRecord> {
        self.by_name.get(name).map(|&index| &self.records[index])
    }

    /// Flattened records in declaration order
    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    /// Top-level records
    pub fn roots(&self) -> impl Iterator<Item = &RouteRecord> {
        self.roots.iter().map(|&index| &self.records[index])
    }

    /// Direct children of a record
    pub fn children<'a>(&'a self, record: &'a RouteRecord) -> impl Iterator<Item = &'a RouteRecord> {
        record.children.iter().map(|&index| &self.records[index])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::StaticView;

    fn page(name: &str) -> Component {
        Component::eager(StaticView::page(name))
    }

    fn sample_table() -> RouteTable {
        RouteTable::new(vec![
            RouteEntry::named("/", "Landing", page("Landing")),
            RouteEntry::new("/", Component::eager(StaticView::layout("Shell"))).with_children(vec![
                RouteEntry::named("sets", "Sets", page("Sets")),
                RouteEntry::named("sets/new", "NewSet", page("NewSet")),
                RouteEntry::named("sets/:id", "SetDetail", page("SetDetail")),
            ]),
        ])
        .unwrap()
    }

    #[test]
    fn test_declaration_order_is_depth_first() {
        let table = sample_table();
        let names: Vec<&str> = table.names().into_iter().map(RouteName::as_str).collect();
        assert_eq!(names, vec!["Landing", "Sets", "NewSet", "SetDetail"]);
        assert_eq!(table.len(), 5);
        assert_eq!(table.roots().count(), 2);
    }

    #[test]
    fn test_literal_beats_param() {
        let table = sample_table();
        let matched = table.resolve("/sets/new").unwrap();
        assert_eq!(matched.name().map(RouteName::as_str), Some("NewSet"));

        let matched = table.resolve("/sets/7").unwrap();
        assert_eq!(matched.name().map(RouteName::as_str), Some("SetDetail"));
        assert_eq!(matched.param("id"), Some("7"));
        assert_eq!(matched.layout().map(|l| l.component.name()), Some("Shell"));
    }

    #[test]
    fn test_specificity_compares_left_to_right() {
        let table = RouteTable::new(vec![
            RouteEntry::named("/:y/b", "ParamFirst", page("ParamFirst")),
            RouteEntry::named("/a/:x", "LiteralFirst", page("LiteralFirst")),
        ])
        .unwrap();
        let matched = table.resolve("/a/b").unwrap();
        assert_eq!(matched.name().map(RouteName::as_str), Some("LiteralFirst"));
    }

    #[test]
    fn test_unnamed_layout_never_matches() {
        let table = RouteTable::new(vec![RouteEntry::new(
            "/",
            Component::eager(StaticView::layout("Shell")),
        )
        .child(RouteEntry::named("home", "Home", page("Home")))])
        .unwrap();

        assert!(matches!(
            table.resolve("/"),
            Err(NavigationError::NotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = RouteTable::new(vec![
            RouteEntry::named("/a", "Same", page("A")),
            RouteEntry::new("/", Component::eager(StaticView::layout("Shell")))
                .child(RouteEntry::named("b", "Same", page("B"))),
        ]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicateName {
                name: "Same".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_root_claim_rejected() {
        let result = RouteTable::new(vec![
            RouteEntry::named("/", "Landing", page("Landing")),
            RouteEntry::named("/", "OtherLanding", page("OtherLanding")),
        ]);
        assert!(matches!(result, Err(ConfigError::DuplicatePath { .. })));

        let result = RouteTable::new(vec![
            RouteEntry::named("/sets/:id", "A", page("A")),
            RouteEntry::named("/sets/:other", "B", page("B")),
        ]);
        assert!(matches!(result, Err(ConfigError::DuplicatePath { .. })));
    }

    #[test]
    fn test_relative_top_level_rejected() {
        let result = RouteTable::new(vec![RouteEntry::named("home", "Home", page("Home"))]);
        assert!(matches!(result, Err(ConfigError::MalformedPath { .. })));
    }

    #[test]
    fn test_href_errors() {
        let table = sample_table();
        let mut params = Params::new();

        assert!(matches!(
            table.href("Nope", &params),
            Err(NavigationError::UnknownRoute { .. })
        ));
        assert!(matches!(
            table.href("SetDetail", &params),
            Err(NavigationError::MissingParam { .. })
        ));

        params.insert("id".to_string(), "9".to_string());
        assert_eq!(table.href("SetDetail", &params).unwrap(), "/sets/9");
        assert!(matches!(
            table.href("Sets", &params),
            Err(NavigationError::UnknownParam { .. })
        ));
    }

    #[test]
    fn test_href_round_trips_non_ascii_and_spaces() {
        let table = RouteTable::new(vec![
            RouteEntry::named("/문제", "Problems", page("Problems")),
            RouteEntry::named("/my sets", "MySets", page("MySets")),
            RouteEntry::named("/my sets/:id", "MySet", page("MySet")),
        ])
        .unwrap();

        for name in ["Problems", "MySets"] {
            let href = table.href(name, &Params::new()).unwrap();
            let matched = table.resolve(&href).unwrap();
            assert_eq!(matched.name().map(RouteName::as_str), Some(name));
        }

        let mut params = Params::new();
        params.insert("id".to_string(), "세트 1".to_string());
        let href = table.href("MySet", &params).unwrap();
        let matched = table.resolve(&href).unwrap();
        assert_eq!(matched.name().map(RouteName::as_str), Some("MySet"));
        assert_eq!(matched.param("id"), Some("세트 1"));

        // Raw text typed into an address bar resolves the same way
        let matched = table.resolve("/문제").unwrap();
        assert_eq!(matched.name().map(RouteName::as_str), Some("Problems"));
    }

    #[test]
    fn test_doubled_leading_slash_is_a_path() {
        let table = RouteTable::new(vec![
            RouteEntry::named("/", "Landing", page("Landing")),
            RouteEntry::named("/editor", "Editor", page("Editor")),
        ])
        .unwrap();

        let matched = table.resolve("//editor").unwrap();
        assert_eq!(matched.name().map(RouteName::as_str), Some("Editor"));
    }

    #[test]
    fn test_catch_all() {
        let table = RouteTable::new(vec![
            RouteEntry::named("/", "Landing", page("Landing")),
            RouteEntry::named("/*rest", "NotFound", page("NotFound")),
        ])
        .unwrap();
        assert!(table.has_catch_all());

        let matched = table.resolve("/").unwrap();
        assert_eq!(matched.name().map(RouteName::as_str), Some("Landing"));

        let matched = table.resolve("/missing/page").unwrap();
        assert_eq!(matched.name().map(RouteName::as_str), Some("NotFound"));
        assert_eq!(matched.param("rest"), Some("missing/page"));

        assert!(sample_table().require_catch_all().is_err());
        assert!(table.require_catch_all().is_ok());
    }

    #[test]
    fn test_resolve_named_keeps_query() {
        let table = sample_table();
        let mut params = Params::new();
        params.insert("id".to_string(), "3".to_string());

        let matched = table
            .resolve_named("SetDetail", &params, vec![("tab".to_string(), "info".to_string())])
            .unwrap();
        assert_eq!(matched.full_path(), "/sets/3?tab=info");
        assert_eq!(matched.ancestors.len(), 1);
    }
}
