//! Error types for the gc-search-connector crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Access tokens and other page credentials
//! never appear in error messages.

/// Errors that can occur while wiring a search page session.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// The page configuration blob could not be parsed as JSON.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The resolved configuration failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// The document location could not be parsed as a URL.
    #[error("location error: {0}")]
    Location(String),
}

/// Convenience type alias for connector results.
pub type Result<T> = std::result::Result<T, ConnectorError>;
