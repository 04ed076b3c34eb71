//! URL locations: path, query and hash

use crate::error::NavigationError;
use std::fmt;
use url::Url;

/// Origin used to parse relative URLs. Only the path, query and fragment survive.
const PARSE_BASE: &str = "http://waypoint.local/";

/// A parsed location
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Percent-encoded path, always starting with `/`
    pub path: String,
    /// Decoded query pairs, in order
    pub query: Vec<(String, String)>,
    /// Decoded hash without the leading `#`
    pub hash: Option<String>,
}

impl Location {
    /// Parse a path-and-query string (`/problem-set-board/42?tab=info#top`)
    /// or an absolute URL. The origin of an absolute URL is ignored.
    pub fn parse(input: &str) -> Result<Self, NavigationError> {
        let invalid = |reason: String| NavigationError::InvalidUrl {
            url: input.to_string(),
            reason,
        };

        // A leading `//` would be read as a host; in a path it is only repeated slashes
        let rest = input.trim_start_matches(['/', '\\']);
        let input_path = if input.len() - rest.len() > 1 {
            format!("/{}", rest)
        } else {
            input.to_string()
        };

        let base = Url::parse(PARSE_BASE).map_err(|e| invalid(e.to_string()))?;
        let url = base.join(&input_path).map_err(|e| invalid(e.to_string()))?;

        if url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".to_string()));
        }

        let query = url.query_pairs().into_owned().collect();
        let hash = url
            .fragment()
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| {
                urlencoding::decode(fragment)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| fragment.to_string())
            });

        Ok(Self {
            path: url.path().to_string(),
            query,
            hash,
        })
    }

    /// Build a location from an already-encoded path
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Add a query pair
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the hash
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// First value for a query key
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path, query and hash rendered back into a URL string
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.query.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            full.push('?');
            full.push_str(&query);
        }
        if let Some(hash) = &self.hash {
            full.push('#');
            full.push_str(&urlencoding::encode(hash));
        }
        full
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}
