//! URL query-string and hash-fragment state.
//!
//! [`UrlState`] holds the two parameter mappings the connector works from:
//! `url_params` parsed from the query string and `hash_params` parsed from
//! the fragment. Both are rebuilt wholesale on every navigation event; a
//! reader holding a mapping across a navigation observes stale data and
//! must re-read.
//!
//! Parsing follows form-urlencoding semantics: tokens are `key=value`
//! pairs separated by `&`, `+` decodes to a space, and percent-escapes are
//! decoded per token. A malformed escape is a non-fatal decode fault — the
//! token is kept verbatim (after `+` replacement) rather than rejected.

use crate::location::PageLocation;

/// An insertion-ordered mapping of decoded parameter names to values.
///
/// Later occurrences of a key overwrite the earlier value in place, so a
/// key appears at most once. Order follows the left-to-right scan of the
/// source string; no correctness property depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: Vec<(String, String)>,
}

impl ParamMap {
    /// Parse a query string or fragment body into a mapping.
    ///
    /// The input must not include the leading `?` or `#`. Never fails:
    /// empty or degenerate input yields an empty mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use gc_search_connector::ParamMap;
    ///
    /// let params = ParamMap::parse("allq=ottawa+weather&page=2");
    /// assert_eq!(params.get("allq"), Some("ottawa weather"));
    /// assert_eq!(params.get("page"), Some("2"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut map = Self::default();
        for token in raw.split('&') {
            // A key cannot begin with `=`; strip any run of them first.
            let token = token.trim_start_matches('=');
            if token.is_empty() {
                continue;
            }
            let (key, value) = match token.split_once('=') {
                Some((key, value)) => (key, value),
                None => (token, ""),
            };
            map.insert(decode_component(key), decode_component(value));
        }
        map
    }

    fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up the decoded value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Look up `key`, treating an empty value as absent.
    ///
    /// Legacy pages gate every parameter on string truthiness, so `allq=`
    /// behaves as if `allq` were never given.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Whether `key` is present, regardless of its value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Both parameter mappings for the current document location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlState {
    /// Parameters from the query string.
    pub url_params: ParamMap,
    /// Parameters from the hash fragment.
    pub hash_params: ParamMap,
}

impl UrlState {
    /// Parse the query string and hash fragment bodies.
    pub fn parse(search: &str, hash: &str) -> Self {
        Self {
            url_params: ParamMap::parse(search),
            hash_params: ParamMap::parse(hash),
        }
    }

    /// Rebuild both mappings from a decomposed location.
    ///
    /// Idempotent: parsing the same location twice yields equal state.
    pub fn from_location(location: &PageLocation) -> Self {
        Self::parse(&location.search, &location.hash)
    }
}

/// Decode one key or value token.
///
/// `+` becomes a space before percent-decoding, per form-urlencoding. A
/// token whose escapes cannot be decoded is passed through with only the
/// `+` replacement applied.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            tracing::debug!(token = raw, "percent-decode failed, keeping raw token");
            spaced
        }
    }
}
