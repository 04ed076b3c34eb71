//! Path patterns
//!
//! A pattern is a `/`-separated list of segments. Each segment is a literal,
//! a named parameter (`:problemSetId`) or a trailing catch-all (`*rest`).
//! Patterns are parsed once when the table is built and never re-parsed.

use crate::error::{ConfigError, NavigationError};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter bindings, keyed by parameter name
pub type Params = BTreeMap<String, String>;

/// One segment of a path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly this text
    Static(String),
    /// Matches one non-empty segment and binds it
    Param(String),
    /// Matches the rest of the path (one or more segments) and binds it
    CatchAll(String),
}

impl Segment {
    /// Specificity rank used to order competing matches
    fn rank(&self) -> u8 {
        match self {
            Segment::Static(_) => 3,
            Segment::Param(_) => 2,
            Segment::CatchAll(_) => 1,
        }
    }

    /// Structural key, identical for patterns that match the same URLs
    fn shape(&self) -> String {
        match self {
            Segment::Static(text) => text.clone(),
            Segment::Param(_) => ":".to_string(),
            Segment::CatchAll(_) => "*".to_string(),
        }
    }
}

/// A parsed path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    absolute: bool,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern such as `/`, `editor` or `problem-set-board/:problemSetId`
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let malformed = |reason: &str| ConfigError::MalformedPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.contains(['?', '#']) {
            return Err(malformed("patterns cannot contain '?' or '#'"));
        }

        let absolute = raw.starts_with('/');
        let trimmed = raw.trim_start_matches('/').trim_end_matches('/');
        let mut segments = Vec::new();

        if !trimmed.is_empty() {
            let parts: Vec<&str> = trimmed.split('/').collect();
            for (index, part) in parts.iter().enumerate() {
                if part.is_empty() {
                    return Err(malformed("empty segment"));
                }

                let segment = if let Some(name) = part.strip_prefix(':') {
                    validate_param_name(name).map_err(|reason| malformed(reason))?;
                    Segment::Param(name.to_string())
                } else if let Some(name) = part.strip_prefix('*') {
                    validate_param_name(name).map_err(|reason| malformed(reason))?;
                    if index != parts.len() - 1 {
                        return Err(malformed("catch-all must be the last segment"));
                    }
                    Segment::CatchAll(name.to_string())
                } else {
                    // Literals are kept decoded so `/my%20sets` and `/my sets` are one path
                    let text = decode(part)
                        .ok_or_else(|| malformed("literal is not valid UTF-8 once decoded"))?;
                    Segment::Static(text)
                };
                segments.push(segment);
            }
        }

        let pattern = Self {
            raw: raw.to_string(),
            absolute,
            segments,
        };
        pattern.check_unique_params()?;
        Ok(pattern)
    }

    /// Append a relative child pattern to this one
    pub fn join(&self, child: &PathPattern) -> Result<PathPattern, ConfigError> {
        if child.absolute {
            return Err(ConfigError::MalformedPath {
                path: child.raw.clone(),
                reason: "nested routes must use relative paths".to_string(),
            });
        }

        if matches!(self.segments.last(), Some(Segment::CatchAll(_))) {
            return Err(ConfigError::MalformedPath {
                path: self.raw.clone(),
                reason: "a catch-all route cannot have children".to_string(),
            });
        }

        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());

        let pattern = PathPattern {
            raw: render(&segments),
            absolute: true,
            segments,
        };
        pattern.check_unique_params()?;
        Ok(pattern)
    }

    /// The pattern text as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this pattern ends with a catch-all segment
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    /// Names of all parameters, in order
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) | Segment::CatchAll(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Specificity used to pick between several matching patterns; greater wins
    pub fn specificity(&self) -> Vec<u8> {
        self.segments.iter().map(Segment::rank).collect()
    }

    /// Key shared by patterns that would claim exactly the same URLs
    pub fn shape(&self) -> String {
        let shape: Vec<String> = self.segments.iter().map(Segment::shape).collect();
        format!("/{}", shape.join("/"))
    }

    /// Match raw (still percent-encoded) URL segments against this pattern.
    /// Segments are percent-decoded before comparing or binding; a segment
    /// that fails to decode or an empty parameter is a non-match.
    pub fn match_segments(&self, url: &[&str]) -> Option<Params> {
        let mut params = Params::new();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(text) => {
                    let raw = url.get(index).copied()?;
                    if decode(raw).as_deref() != Some(text.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = url.get(index).copied()?;
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), decode(value)?);
                }
                Segment::CatchAll(name) => {
                    let rest = url.get(index..).filter(|rest| !rest.is_empty())?;
                    if rest.iter().any(|part| part.is_empty()) {
                        return None;
                    }
                    let decoded: Option<Vec<String>> = rest.iter().map(|part| decode(part)).collect();
                    params.insert(name.clone(), decoded?.join("/"));
                    return Some(params);
                }
            }
        }

        if url.len() != self.segments.len() {
            return None;
        }
        Some(params)
    }

    /// Build a concrete path from parameter bindings.
    /// Fails with `MissingParam` when a binding is absent or empty.
    pub fn build(&self, route: &str, params: &Params) -> Result<String, NavigationError> {
        let mut parts = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match segment {
                Segment::Static(text) => parts.push(urlencoding::encode(text).into_owned()),
                Segment::Param(name) => {
                    let value = required(route, name, params)?;
                    parts.push(urlencoding::encode(value).into_owned());
                }
                Segment::CatchAll(name) => {
                    let value = required(route, name, params)?;
                    let encoded: Vec<String> = value
                        .split('/')
                        .filter(|part| !part.is_empty())
                        .map(|part| urlencoding::encode(part).into_owned())
                        .collect();
                    if encoded.is_empty() {
                        return Err(NavigationError::MissingParam {
                            route: route.to_string(),
                            param: name.clone(),
                        });
                    }
                    parts.push(encoded.join("/"));
                }
            }
        }

        Ok(format!("/{}", parts.join("/")))
    }

    fn check_unique_params(&self) -> Result<(), ConfigError> {
        let mut seen = Vec::new();
        for name in self.params() {
            if seen.contains(&name) {
                return Err(ConfigError::MalformedPath {
                    path: self.raw.clone(),
                    reason: format!("param ':{}' appears more than once", name),
                });
            }
            seen.push(name);
        }
        Ok(())
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a URL path into raw segments.
/// One leading and one trailing slash are ignored, so `/` yields no segments.
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

fn validate_param_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("parameter name is empty");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("parameter names may only contain letters, digits and '_'");
    }
    Ok(())
}

fn required<'a>(route: &str, name: &str, params: &'a Params) -> Result<&'a str, NavigationError> {
    match params.get(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(NavigationError::MissingParam {
            route: route.to_string(),
            param: name.to_string(),
        }),
    }
}

fn decode(raw: &str) -> Option<String> {
    urlencoding::decode(raw).ok().map(|value| value.into_owned())
}

fn render(segments: &[Segment]) -> String {
    let parts: Vec<String> = segments
        .iter()
        .map(|segment| match segment {
            Segment::Static(text) => text.clone(),
            Segment::Param(name) => format!(":{}", name),
            Segment::CatchAll(name) => format!("*{}", name),
        })
        .collect();
    format!("/{}", parts.join("/"))
}
