//! # gc-search-connector
//!
//! Headless connector core for the Canada.ca search page.
//!
//! This crate owns the logic that sits between a search page and the
//! hosted search engine SDK: resolving page configuration, parsing the
//! document location into URL state, translating legacy filter links into
//! engine query syntax, bootstrapping the search session, mirroring
//! canonical query state into browser history, preprocessing outgoing
//! request bodies, and rendering page templates from typed view models.
//! The SDK itself — query execution, ranking, suggestions, transport — is
//! an opaque collaborator behind the [`SearchSession`] and
//! [`HistoryBackend`] traits.
//!
//! ## Design
//!
//! - Synchronous and single-threaded: every operation is a pure function
//!   over strings or an explicit action dispatched across a trait boundary
//! - URL state is rebuilt wholesale per navigation event, never patched
//! - Legacy filter translation happens once at bootstrap; interactive
//!   typing never re-runs it
//! - Degraded inputs degrade the output, they never abort: malformed
//!   percent-escapes pass through, unrecognized filter values contribute
//!   nothing, unrewritable request bodies are sent unmodified
//! - Built-in page markup stands in for any template the page omits, so
//!   rendering never depends on optional DOM content
//!
//! ## Security
//!
//! - Result link URIs are protocol-filtered before rendering, so
//!   `javascript:` URIs cannot reach an `href`
//! - Analytics bodies have their page URL forced to the configured value,
//!   keeping user-sensitive URLs out of outgoing requests
//! - Access tokens never appear in error messages or logs

pub mod config;
pub mod dates;
pub mod error;
pub mod history;
pub mod location;
pub mod markup;
pub mod params;
pub mod query;
pub mod request;
pub mod session;
pub mod template;

pub use config::{
    organization_endpoints, ConfigOverrides, Lang, OrganizationEndpoints, PageEnvironment,
    SearchPageConfig,
};
pub use error::{ConnectorError, Result};
pub use history::{HistoryBackend, HistorySync};
pub use location::PageLocation;
pub use markup::{pager_item_classes, PageMarkup};
pub use params::{ParamMap, UrlState};
pub use query::{
    has_legacy_filters, translate_legacy_filters, TranslatedQuery, LEGACY_TRIGGER_KEYS,
};
pub use request::{preprocess_request, PreprocessedRequest, RequestOrigin};
pub use session::{
    BootstrapOutcome, Connector, SearchSession, SessionAction, SortCriterion, SortField,
    SortOrder,
};
pub use template::{filter_protocol, Template, TemplateView};

/// Resolve a page and run the bootstrap sequence against a session.
///
/// Convenience wrapper that builds a [`Connector`] and immediately calls
/// [`Connector::bootstrap`]. Use the connector directly when the page
/// needs to keep it around for navigation events.
///
/// # Errors
///
/// Same as [`Connector::new`].
///
/// # Examples
///
/// ```
/// use gc_search_connector::{bootstrap, PageEnvironment, SearchSession, SessionAction};
///
/// struct NullSession(bool);
///
/// impl SearchSession for NullSession {
///     fn dispatch(&mut self, _action: SessionAction) {}
///     fn execute_first_search(&mut self) {
///         self.0 = true;
///     }
///     fn first_search_executed(&self) -> bool {
///         self.0
///     }
/// }
///
/// let env = PageEnvironment::from_location(
///     "https://www.canada.ca/en/sr/srb.html?allq=ottawa+weather",
/// )?;
/// let mut session = NullSession(false);
/// let outcome = bootstrap(env, Some(r#"{"organizationId": "org123"}"#), &mut session)?;
/// assert!(outcome.submitted_legacy_search);
/// # Ok::<(), gc_search_connector::ConnectorError>(())
/// ```
pub fn bootstrap<S: SearchSession>(
    env: PageEnvironment,
    overrides_json: Option<&str>,
    session: &mut S,
) -> Result<BootstrapOutcome> {
    let mut connector = Connector::new(env, overrides_json)?;
    Ok(connector.bootstrap(session))
}
