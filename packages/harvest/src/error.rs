//! Typed errors for the harvest library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Top-level errors from a harvest run.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Page fetch failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// LLM extraction failed
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// Configuration is invalid or incomplete
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Writing the output file failed
    #[error("output error: {0}")]
    Output(#[source] std::io::Error),

    /// Serializing records for output failed
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from the page-fetch layer.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (transport)
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Server replied with a non-success status
    #[error("HTTP status {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Errors from the LLM extraction layer.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The LLM API call itself failed (transport, auth, server error)
    #[error("LLM API error: {0}")]
    Api(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The LLM returned something that is not the expected record shape.
    ///
    /// Recoverable: the page yields zero records and the run continues.
    #[error("malformed LLM response: {reason}")]
    MalformedResponse { reason: String },

    /// The LLM returned an empty completion
    #[error("empty LLM response")]
    EmptyResponse,
}

/// Errors detected before any crawling starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required API key environment variable is not set
    #[error("missing API key: set {var}")]
    MissingApiKey { var: &'static str },

    /// Base URL does not parse
    #[error("invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    /// CSS selector does not parse
    #[error("invalid CSS selector: {selector}")]
    InvalidSelector { selector: String },

    /// Required-field list names a field the schema does not have
    #[error("unknown required field: {field}")]
    UnknownField { field: String },
}

/// Result type alias for harvest operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
