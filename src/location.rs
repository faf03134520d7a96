//! Document location decomposition.
//!
//! [`PageLocation`] is the connector's read-only snapshot of the browser
//! location: origin, path, query string, and hash fragment. It is captured
//! once per navigation event and never mutated in place.

use url::Url;

use crate::error::{ConnectorError, Result};
use crate::params::ParamMap;

/// A decomposed document location.
///
/// `search` and `hash` are stored without their `?`/`#` prefixes, matching
/// what the parsing layer consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme plus host and optional port, e.g. `https://www.canada.ca`.
    pub origin: String,
    /// The path component, always beginning with `/` for http(s) URLs.
    pub path: String,
    /// The raw query string, without the leading `?`.
    pub search: String,
    /// The raw fragment, without the leading `#`.
    pub hash: String,
}

impl PageLocation {
    /// Parse a full document URL into its components.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Location`] if the input is not an absolute
    /// URL.
    pub fn parse(raw: &str) -> Result<Self> {
        let parsed =
            Url::parse(raw).map_err(|err| ConnectorError::Location(err.to_string()))?;

        // Compose the origin by hand: the url crate serialises file:// origins
        // as the opaque "null", which the history layer cannot match on.
        let origin = match parsed.host_str() {
            Some(host) => match parsed.port() {
                Some(port) => format!("{}://{host}:{port}", parsed.scheme()),
                None => format!("{}://{host}", parsed.scheme()),
            },
            None => format!("{}://", parsed.scheme()),
        };

        Ok(Self {
            origin,
            path: parsed.path().to_string(),
            search: parsed.query().unwrap_or_default().to_string(),
            hash: parsed.fragment().unwrap_or_default().to_string(),
        })
    }

    /// The page URL without query string or fragment.
    pub fn page_url(&self) -> String {
        format!("{}{}", self.origin, self.path)
    }

    /// Whether the document was loaded from the local filesystem.
    pub fn is_file(&self) -> bool {
        self.origin.starts_with("file://")
    }

    /// The fragment the URL manager should be seeded with.
    ///
    /// Normally the hash carries the canonical query state. On initial load,
    /// before any search has executed and with no `q` hash parameter, the
    /// raw query string (with `+` read as spaces) stands in, so that links
    /// built against the old query-string scheme still land on results.
    pub fn fragment_candidate(
        &self,
        first_search_executed: bool,
        hash_params: &ParamMap,
    ) -> String {
        if !first_search_executed && hash_params.non_empty("q").is_none() {
            return self.search.replace('+', " ");
        }
        self.hash.clone()
    }
}
