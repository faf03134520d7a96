//! Search session boundary and bootstrap sequence.
//!
//! The external search SDK owns query execution, ranking, and transport;
//! this module models it as the [`SearchSession`] trait and drives it
//! through the one-shot bootstrap sequence a page load performs. The
//! [`Connector`] is the page-load context object: resolved configuration,
//! the captured location, and the current URL state, constructed once at
//! page load and rebuilt (never patched) on navigation events.

use crate::config::{organization_endpoints, ConfigOverrides, PageEnvironment, SearchPageConfig};
use crate::error::Result;
use crate::location::PageLocation;
use crate::params::UrlState;
use crate::query::translate_legacy_filters;

/// Field a sort criterion orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Engine relevancy score.
    Relevancy,
    /// Document modification date.
    Date,
}

/// Direction of a sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A sort criterion registered against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriterion {
    pub by: SortField,
    pub order: SortOrder,
}

impl SortCriterion {
    /// The criterion legacy `sort` links ask for: newest first.
    pub fn date_descending() -> Self {
        Self {
            by: SortField::Date,
            order: SortOrder::Descending,
        }
    }
}

/// An action dispatched across the session boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Attach the canonical page URL to the session context.
    SetContext { search_page_url: String },
    /// Replace the search box text.
    UpdateQueryText(String),
    /// Replace the advanced (field-qualified) query expression.
    UpdateAdvancedQuery(String),
    /// Register a sort criterion.
    RegisterSort(SortCriterion),
    /// Submit the current query.
    SubmitSearch,
}

/// The external search session.
///
/// Implementations wrap the hosted search SDK. All connector work happens
/// on the caller's thread; the session is free to run its own network
/// machinery behind these calls.
pub trait SearchSession {
    /// Dispatch a state-changing action.
    fn dispatch(&mut self, action: SessionAction);

    /// Execute the initial search for the page.
    fn execute_first_search(&mut self);

    /// Whether the initial search has already executed.
    fn first_search_executed(&self) -> bool;
}

/// What a bootstrap run decided, for the embedder to act on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapOutcome {
    /// Initial search box text from the plain `q` parameter, hash winning
    /// over query string.
    pub initial_query: Option<String>,
    /// The fragment the URL manager was seeded with.
    pub fragment: String,
    /// Whether legacy filters produced a translated submission.
    pub submitted_legacy_search: bool,
    /// Whether the initial search was triggered.
    pub first_search_triggered: bool,
}

/// The page-load context: configuration, location, and URL state.
#[derive(Debug, Clone)]
pub struct Connector {
    config: SearchPageConfig,
    location: PageLocation,
    state: UrlState,
}

impl Connector {
    /// Resolve configuration and capture URL state for a page.
    ///
    /// `overrides_json` is the page's configuration blob, if present.
    /// Missing endpoints are derived from the organization id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConnectorError::ConfigParse`] for a malformed blob
    /// and [`crate::ConnectorError::Config`] when the resolved
    /// configuration fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use gc_search_connector::{Connector, PageEnvironment};
    ///
    /// let env = PageEnvironment::from_location(
    ///     "https://www.canada.ca/en/sr/srb.html?allq=ottawa+weather",
    /// )?;
    /// let connector = Connector::new(env, Some(r#"{"organizationId": "org123"}"#))?;
    /// assert!(connector.config().endpoints.is_some());
    /// # Ok::<(), gc_search_connector::ConnectorError>(())
    /// ```
    pub fn new(env: PageEnvironment, overrides_json: Option<&str>) -> Result<Self> {
        let overrides = match overrides_json {
            Some(raw) => ConfigOverrides::from_json(raw)?,
            None => ConfigOverrides::default(),
        };
        let mut config = SearchPageConfig::resolve(&env, overrides);
        config.validate()?;
        if config.endpoints.is_none() {
            config.endpoints = Some(organization_endpoints(&config.organization_id, "prod"));
        }
        let state = UrlState::from_location(&env.location);
        Ok(Self {
            config,
            location: env.location,
            state,
        })
    }

    /// The resolved page configuration.
    pub fn config(&self) -> &SearchPageConfig {
        &self.config
    }

    /// The captured document location.
    pub fn location(&self) -> &PageLocation {
        &self.location
    }

    /// The current URL state.
    pub fn url_state(&self) -> &UrlState {
        &self.state
    }

    /// Rebuild both parameter mappings from the captured location.
    ///
    /// Idempotent, so a navigation that fires both `popstate` and
    /// `hashchange` re-parses harmlessly.
    pub fn refresh_url_state(&mut self) {
        self.state = UrlState::from_location(&self.location);
    }

    /// Handle a history navigation: capture the new location and rebuild
    /// the URL state wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConnectorError::Location`] for an unparseable
    /// location; the previous state is left untouched in that case.
    pub fn on_popstate(&mut self, location: &str) -> Result<()> {
        self.location = PageLocation::parse(location)?;
        self.refresh_url_state();
        Ok(())
    }

    /// The fragment the URL manager should synchronise to right now.
    pub fn current_fragment(&self, first_search_executed: bool) -> String {
        self.location
            .fragment_candidate(first_search_executed, &self.state.hash_params)
    }

    /// Run the one-shot bootstrap sequence against a session.
    ///
    /// Ordering is load-bearing: the URL state is already parsed, the
    /// context is attached before any query action, and legacy filters are
    /// translated and submitted before the initial search decision. The
    /// legacy submission happens once here and is never re-run on
    /// interactive typing.
    pub fn bootstrap<S: SearchSession>(&mut self, session: &mut S) -> BootstrapOutcome {
        // The canonical page URL can be forced through the URL itself.
        if let Some(origin) = self
            .state
            .url_params
            .non_empty("originLevel3")
            .map(str::to_string)
        {
            self.config.origin_level3 = origin;
        }

        // 1. Context travels with every request the session issues.
        session.dispatch(SessionAction::SetContext {
            search_page_url: self.config.origin_level3.clone(),
        });

        // 2. Legacy filter parameters produce a one-shot translated search.
        let mut submitted_legacy_search = false;
        if let Some(query) = translate_legacy_filters(&self.state.url_params) {
            if query.sort_by_date {
                session.dispatch(SessionAction::RegisterSort(SortCriterion::date_descending()));
            }
            if !query.advanced.is_empty() {
                session.dispatch(SessionAction::UpdateAdvancedQuery(query.advanced));
            }
            session.dispatch(SessionAction::UpdateQueryText(query.free_text));
            session.dispatch(SessionAction::SubmitSearch);
            submitted_legacy_search = true;
            tracing::debug!("legacy filters translated and submitted");
        }

        // 3. Seed the search box from the plain `q` parameter.
        let initial_query = self
            .state
            .hash_params
            .non_empty("q")
            .or_else(|| self.state.url_params.non_empty("q"))
            .map(str::to_string);

        // 4. The initial search fires only when the URL carries query state.
        let fragment = self.current_fragment(session.first_search_executed());
        let mut first_search_triggered = false;
        if !session.first_search_executed() && !fragment.is_empty() && fragment != "q=" {
            session.execute_first_search();
            first_search_triggered = true;
        }

        BootstrapOutcome {
            initial_query,
            fragment,
            submitted_legacy_search,
            first_search_triggered,
        }
    }
}
