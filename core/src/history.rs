//! History modes and the navigation history stack
//!
//! The mode decides how an application path is written into a browser-style
//! location (`/base/home`, `/base/#/home`, or just `/home` in memory). The
//! stack records committed navigations and supports moving back and forward.

use crate::error::{ConfigError, NavigationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of history entries kept
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// Kind of history mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    /// Path-based locations (`/base/home`)
    #[default]
    Web,
    /// Hash-based locations (`/base/#/home`)
    Hash,
    /// No external location at all
    Memory,
}

impl HistoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryKind::Web => "web",
            HistoryKind::Hash => "hash",
            HistoryKind::Memory => "memory",
        }
    }
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web" | "html5" => Ok(HistoryKind::Web),
            "hash" => Ok(HistoryKind::Hash),
            "memory" | "abstract" => Ok(HistoryKind::Memory),
            other => Err(ConfigError::InvalidValue {
                field: "history".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// A history mode with its base prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMode {
    kind: HistoryKind,
    /// Normalized base: empty for the root, otherwise `/segment` without a trailing slash
    base: String,
}

impl HistoryMode {
    pub fn new(kind: HistoryKind, base: &str) -> Self {
        Self {
            kind,
            base: normalize_base(base),
        }
    }

    pub fn web(base: &str) -> Self {
        Self::new(HistoryKind::Web, base)
    }

    pub fn hash(base: &str) -> Self {
        Self::new(HistoryKind::Hash, base)
    }

    pub fn memory() -> Self {
        Self::new(HistoryKind::Memory, "/")
    }

    pub fn kind(&self) -> HistoryKind {
        self.kind
    }

    /// Base prefix as written in locations (`/` for the root)
    pub fn base(&self) -> &str {
        if self.base.is_empty() {
            "/"
        } else {
            &self.base
        }
    }

    /// Turn an application path (with query and hash) into a location
    pub fn href(&self, full_path: &str) -> String {
        match self.kind {
            HistoryKind::Web => format!("{}{}", self.base, full_path),
            HistoryKind::Hash => format!("{}/#{}", self.base, full_path),
            HistoryKind::Memory => full_path.to_string(),
        }
    }

    /// Recover the application path from a location
    pub fn strip(&self, location: &str) -> Result<String, NavigationError> {
        let outside = || NavigationError::OutsideBase {
            location: location.to_string(),
            base: self.base().to_string(),
        };

        match self.kind {
            HistoryKind::Memory => Ok(location.to_string()),
            HistoryKind::Web => {
                let rest = location.strip_prefix(self.base.as_str()).ok_or_else(outside)?;
                if rest.is_empty() {
                    Ok("/".to_string())
                } else if rest.starts_with(['/', '?', '#']) {
                    Ok(if rest.starts_with('/') {
                        rest.to_string()
                    } else {
                        format!("/{}", rest)
                    })
                } else {
                    Err(outside())
                }
            }
            HistoryKind::Hash => {
                let (prefix, path) = match location.split_once('#') {
                    Some((prefix, path)) => (prefix, path),
                    None => (location, ""),
                };
                let prefix = prefix.trim_end_matches('/');
                if prefix != self.base {
                    return Err(outside());
                }
                if path.is_empty() {
                    Ok("/".to_string())
                } else if path.starts_with('/') {
                    Ok(path.to_string())
                } else {
                    Ok(format!("/{}", path))
                }
            }
        }
    }
}

impl Default for HistoryMode {
    fn default() -> Self {
        Self::web("/")
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Navigation history: a list of committed paths and a cursor into it
#[derive(Debug, Clone)]
pub struct History {
    mode: HistoryMode,
    entries: Vec<String>,
    cursor: usize,
    max_entries: usize,
}

/// Create a history for the given mode
pub fn create_history(mode: HistoryMode) -> History {
    History::new(mode)
}

impl History {
    pub fn new(mode: HistoryMode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
            cursor: 0,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Set maximum history size; at least one entry is always kept
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    pub fn mode(&self) -> &HistoryMode {
        &self.mode
    }

    /// Current application path
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Current location as the mode writes it
    pub fn location(&self) -> Option<String> {
        self.current().map(|path| self.mode.href(path))
    }

    /// Add a new entry after the current one, dropping any forward entries
    pub fn push(&mut self, full_path: String) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(full_path);

        // Trim oldest entries if the history exceeds its max size
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Replace the current entry
    pub fn replace(&mut self, full_path: String) {
        match self.entries.get_mut(self.cursor) {
            Some(entry) => *entry = full_path,
            None => self.push(full_path),
        }
    }

    /// Path `delta` entries away from the cursor, without moving
    pub fn peek(&self, delta: isize) -> Option<&str> {
        let target = self.cursor.checked_add_signed(delta)?;
        self.entries.get(target).map(String::as_str)
    }

    /// Move the cursor by `delta` entries
    pub fn go(&mut self, delta: isize) -> Result<&str, NavigationError> {
        let target = self
            .cursor
            .checked_add_signed(delta)
            .filter(|&target| target < self.entries.len())
            .ok_or(NavigationError::NoHistory)?;
        self.cursor = target;
        Ok(&self.entries[target])
    }

    pub fn can_go_back(&self) -> bool {
        self.peek(-1).is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.peek(1).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
