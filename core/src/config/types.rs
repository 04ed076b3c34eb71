//! Router settings
//!
//! Core only accepts fully resolved settings.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::ConfigError;
use crate::history::{History, HistoryKind, HistoryMode, DEFAULT_MAX_ENTRIES};
use serde::{Deserialize, Serialize};

/// Settings for building a router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// History mode kind
    pub history: HistoryKind,
    /// Base prefix for web and hash modes
    pub base: String,
    /// Maximum number of history entries
    pub max_history: usize,
    /// Reject route tables that declare no catch-all route
    pub require_catch_all: bool,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            history: HistoryKind::Web,
            base: "/".to_string(),
            max_history: DEFAULT_MAX_ENTRIES,
            require_catch_all: false,
        }
    }
}

impl RouterSettings {
    /// Set the history kind
    pub fn with_history(mut self, history: HistoryKind) -> Self {
        self.history = history;
        self
    }

    /// Set the base prefix
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// The configured history mode
    pub fn history_mode(&self) -> HistoryMode {
        HistoryMode::new(self.history, &self.base)
    }

    /// A fresh history for these settings
    pub fn create_history(&self) -> History {
        History::new(self.history_mode()).with_max_entries(self.max_history)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "base".to_string(),
                value: self.base.clone(),
            });
        }

        if self.base.contains(['?', '#']) {
            return Err(ConfigError::InvalidValue {
                field: "base".to_string(),
                value: self.base.clone(),
            });
        }

        if self.max_history == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_history".to_string(),
                value: self.max_history.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let settings: RouterSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, RouterSettings::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let settings: RouterSettings =
            serde_json::from_str(r#"{"history": "hash", "base": "/app"}"#).unwrap();
        assert_eq!(settings.history, HistoryKind::Hash);
        assert_eq!(settings.history_mode().href("/home"), "/app/#/home");
        assert_eq!(settings.max_history, DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn test_validate() {
        let settings = RouterSettings::default().with_base("app");
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "base"
        ));

        let settings = RouterSettings {
            max_history: 0,
            ..RouterSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
