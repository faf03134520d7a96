//! Page configuration resolution.
//!
//! The search page carries a JSON configuration blob with page-level
//! overrides. The resolved [`SearchPageConfig`] is a three-layer merge,
//! later layers winning: built-in defaults, values detected from the
//! document itself, then the explicit overrides. Unknown keys in the blob
//! are ignored; a blob that is not valid JSON is an explicit, recoverable
//! error rather than a startup fault.

use serde::{Deserialize, Serialize};

use crate::error::{ConnectorError, Result};
use crate::location::PageLocation;

/// Interface language of the search page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English.
    #[default]
    En,
    /// French.
    Fr,
}

/// What the connector can observe about the hosting document.
///
/// The embedder fills this from the live page; tests construct it
/// directly.
#[derive(Debug, Clone, Default)]
pub struct PageEnvironment {
    /// The decomposed document location.
    pub location: PageLocation,
    /// The document's declared language tag (`<html lang>`), if any.
    pub document_lang: Option<String>,
    /// Whether the advanced-search form is present in the document.
    pub advanced_form_present: bool,
}

impl PageEnvironment {
    /// Build an environment from a raw document URL, with no document
    /// language and no advanced form.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Location`] if `raw` is not an absolute URL.
    pub fn from_location(raw: &str) -> Result<Self> {
        Ok(Self {
            location: PageLocation::parse(raw)?,
            document_lang: None,
            advanced_form_present: false,
        })
    }
}

/// Page-level overrides, deserialized from the configuration blob.
///
/// Every field is optional; only present keys override the detected
/// configuration. Keys are camelCase in the blob.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    pub search_hub: Option<String>,
    pub organization_id: Option<String>,
    pub access_token: Option<String>,
    pub search_box_query: Option<String>,
    /// Raw language tag; anything starting with `fr` selects French.
    pub lang: Option<String>,
    pub number_of_suggestions: Option<u32>,
    pub unsupported_suggestions: Option<bool>,
    pub enable_history_push: Option<bool>,
    pub is_context_search: Option<bool>,
    pub is_advanced_search: Option<bool>,
    pub origin_level3: Option<String>,
    pub endpoints: Option<OrganizationEndpoints>,
}

impl ConfigOverrides {
    /// Parse the page's JSON configuration blob.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::ConfigParse`] if the blob is not valid
    /// JSON. Unknown keys are ignored, not errors.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// The endpoint family the session talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationEndpoints {
    /// Platform API base URL.
    pub platform: String,
    /// Usage analytics base URL.
    pub analytics: String,
    /// Search API URL.
    pub search: String,
    /// Administration console URL.
    pub admin: String,
}

/// Build the default endpoint family for an organization.
///
/// `environment` of `"prod"` yields the bare production hosts; any other
/// value is appended to the `org` infix (`orgstg`, `orghipaa`, ...).
pub fn organization_endpoints(organization_id: &str, environment: &str) -> OrganizationEndpoints {
    let infix = if environment == "prod" {
        "org".to_string()
    } else {
        format!("org{environment}")
    };
    let platform = format!("https://{organization_id}.{infix}.coveo.com");
    OrganizationEndpoints {
        analytics: format!("https://{organization_id}.analytics.{infix}.coveo.com"),
        search: format!("{platform}/rest/search/v2"),
        admin: format!("https://{organization_id}.admin.{infix}.coveo.com"),
        platform,
    }
}

/// The fully resolved search page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchPageConfig {
    /// Search hub name reported with every query.
    pub search_hub: String,
    /// Organization identifier; required unless `endpoints` is supplied.
    pub organization_id: String,
    /// Public access token for the search API.
    pub access_token: String,
    /// CSS selector locating the search box input.
    pub search_box_query: String,
    /// Interface language.
    pub lang: Lang,
    /// How many query suggestions to request (0 disables suggestions).
    pub number_of_suggestions: u32,
    /// Whether the experimental suggestions UI is allowed.
    pub unsupported_suggestions: bool,
    /// Whether canonical query state is mirrored into browser history.
    pub enable_history_push: bool,
    /// Whether this page is a contextual search embedded outside the
    /// dedicated results pages.
    pub is_context_search: bool,
    /// Whether this page is the advanced-search form.
    pub is_advanced_search: bool,
    /// Canonical page URL reported to analytics.
    pub origin_level3: String,
    /// Explicit endpoint family; derived from `organization_id` when absent.
    pub endpoints: Option<OrganizationEndpoints>,
}

impl Default for SearchPageConfig {
    fn default() -> Self {
        Self {
            search_hub: "canada-gouv-public-websites".into(),
            organization_id: String::new(),
            access_token: String::new(),
            search_box_query: "#sch-inp-ac".into(),
            lang: Lang::En,
            number_of_suggestions: 0,
            unsupported_suggestions: false,
            enable_history_push: true,
            is_context_search: false,
            is_advanced_search: false,
            origin_level3: String::new(),
            endpoints: None,
        }
    }
}

impl SearchPageConfig {
    /// Resolve the configuration for a page.
    ///
    /// Applies the detected layer over the defaults, then the explicit
    /// overrides over both:
    ///
    /// - French is detected from the document language tag, or from a
    ///   `/fr/` path segment when no tag is declared.
    /// - Context search is assumed unless the path is one of the dedicated
    ///   results pages (`/sr/srb.html`, `/sr/sra.html`).
    /// - Advanced search is detected from the form element or the
    ///   advanced-search page paths, and disables history push.
    /// - `origin_level3` defaults to the page URL itself.
    pub fn resolve(env: &PageEnvironment, overrides: ConfigOverrides) -> Self {
        let mut config = Self::default();
        let path = env.location.path.as_str();

        if detect_french(env) {
            config.lang = Lang::Fr;
        }
        config.is_context_search =
            !path.ends_with("/sr/srb.html") && !path.ends_with("/sr/sra.html");
        config.is_advanced_search = env.advanced_form_present
            || path.ends_with("/advanced-search.html")
            || path.ends_with("/recherche-avancee.html");
        config.enable_history_push = !config.is_advanced_search;
        config.origin_level3 = env.location.page_url();

        if let Some(value) = overrides.search_hub {
            config.search_hub = value;
        }
        if let Some(value) = overrides.organization_id {
            config.organization_id = value;
        }
        if let Some(value) = overrides.access_token {
            config.access_token = value;
        }
        if let Some(value) = overrides.search_box_query {
            config.search_box_query = value;
        }
        if let Some(value) = overrides.lang {
            config.lang = if value.starts_with("fr") { Lang::Fr } else { Lang::En };
        }
        if let Some(value) = overrides.number_of_suggestions {
            config.number_of_suggestions = value;
        }
        if let Some(value) = overrides.unsupported_suggestions {
            config.unsupported_suggestions = value;
        }
        if let Some(value) = overrides.enable_history_push {
            config.enable_history_push = value;
        }
        if let Some(value) = overrides.is_context_search {
            config.is_context_search = value;
        }
        if let Some(value) = overrides.is_advanced_search {
            config.is_advanced_search = value;
        }
        if let Some(value) = overrides.origin_level3 {
            config.origin_level3 = value;
        }
        if let Some(value) = overrides.endpoints {
            config.endpoints = Some(value);
        }

        config
    }

    /// Validates this configuration, returning an error if any field is
    /// unusable.
    ///
    /// Checks:
    /// - `search_hub` must not be empty
    /// - `search_box_query` must not be empty
    /// - one of `organization_id` or `endpoints` must be supplied
    pub fn validate(&self) -> Result<()> {
        if self.search_hub.is_empty() {
            return Err(ConnectorError::Config("searchHub must not be empty".into()));
        }
        if self.search_box_query.is_empty() {
            return Err(ConnectorError::Config(
                "searchBoxQuery must not be empty".into(),
            ));
        }
        if self.organization_id.is_empty() && self.endpoints.is_none() {
            return Err(ConnectorError::Config(
                "organizationId is required when endpoints are not supplied".into(),
            ));
        }
        Ok(())
    }

    /// Whether the experimental query-suggestions UI should be built.
    ///
    /// Suggestions need the experimental opt-in and a non-zero suggestion
    /// count, and stay off the production host entirely.
    pub fn suggestions_enabled(&self, hostname: &str) -> bool {
        self.unsupported_suggestions
            && self.number_of_suggestions > 0
            && hostname != "www.canada.ca"
    }
}

/// French is declared by the document language tag, or inferred from the
/// path when no tag is present.
fn detect_french(env: &PageEnvironment) -> bool {
    match env.document_lang.as_deref() {
        Some(lang) => lang.starts_with("fr"),
        None => env.location.path.contains("/fr/"),
    }
}
