//! Outgoing request preprocessing.
//!
//! The session hands every request body through this hook before it
//! leaves the page. Analytics bodies get the canonical page URL and are
//! surfaced as a search event the embedder may re-broadcast; search
//! bodies additionally have query-syntax support flipped to match the
//! advanced-search setting. A body that cannot be rewritten is sent
//! unmodified — preprocessing never blocks a request.

use serde_json::Value;

use crate::config::SearchPageConfig;

/// Which client issued the request being preprocessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOrigin {
    /// The search API client.
    SearchApiFetch,
    /// The usage-analytics client.
    AnalyticsFetch,
}

/// A preprocessed request body.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessedRequest {
    /// The body to send, rewritten when possible.
    pub body: String,
    /// For analytics requests, the rewritten payload for the page's
    /// search-event broadcast.
    pub search_event: Option<Value>,
}

/// Rewrite a request body for its origin.
///
/// Never fails: a malformed body, or one whose shape does not match,
/// is logged at warn level and returned unmodified.
pub fn preprocess_request(
    origin: RequestOrigin,
    body: &str,
    config: &SearchPageConfig,
) -> PreprocessedRequest {
    match rewrite_body(origin, body, config) {
        Ok(done) => done,
        Err(fault) => {
            tracing::warn!(?origin, %fault, "request preprocessing failed, sending body unmodified");
            PreprocessedRequest {
                body: body.to_string(),
                search_event: None,
            }
        }
    }
}

fn rewrite_body(
    origin: RequestOrigin,
    body: &str,
    config: &SearchPageConfig,
) -> Result<PreprocessedRequest, String> {
    let mut content: Value = serde_json::from_str(body).map_err(|err| err.to_string())?;
    let top = content
        .as_object_mut()
        .ok_or_else(|| "request body is not a JSON object".to_string())?;

    match origin {
        RequestOrigin::AnalyticsFetch => {
            top.insert(
                "originLevel3".into(),
                Value::String(config.origin_level3.clone()),
            );
        }
        RequestOrigin::SearchApiFetch => {
            top.insert(
                "enableQuerySyntax".into(),
                Value::Bool(config.is_advanced_search),
            );
            let analytics = top
                .get_mut("analytics")
                .and_then(Value::as_object_mut)
                .ok_or_else(|| "analytics section missing from search body".to_string())?;
            analytics.insert(
                "originLevel3".into(),
                Value::String(config.origin_level3.clone()),
            );
        }
    }

    let body = serde_json::to_string(&content).map_err(|err| err.to_string())?;
    let search_event = match origin {
        RequestOrigin::AnalyticsFetch => Some(content),
        RequestOrigin::SearchApiFetch => None,
    };
    Ok(PreprocessedRequest { body, search_event })
}
