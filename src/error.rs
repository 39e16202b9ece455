//! Error types for merge-pr

use thiserror::Error;

/// Errors that escape the reconciler
///
/// Ordinary HTTP error statuses are not errors: they come back as
/// [`ApiResponse`](crate::platform::ApiResponse) values and end up in a
/// [`MergeOutcome`](crate::types::MergeOutcome). Only failures below the HTTP
/// layer, or data the API should never have produced, land here.
#[derive(Debug, Error)]
pub enum Error {
    /// The API answered with data we could not make sense of
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Connection-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON in a response body
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API base URL could not be joined with a request path
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// No usable credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// Flow file could not be read, parsed or validated
    #[error("config error: {0}")]
    Config(String),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
