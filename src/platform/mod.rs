//! Transport layer for the GitHub REST API
//!
//! The reconciler talks to GitHub only through [`Transport`]. Non-2xx
//! statuses are ordinary [`ApiResponse`] values for the caller to inspect;
//! `Err` is reserved for failures below HTTP.

mod dry_run;
mod factory;
mod github;

pub use dry_run::{DRY_RUN_BODY, DryRunTransport, RecordedCall};
pub use factory::{TransportConfig, create_transport};
pub use github::{ACCEPT_HEADER, DEFAULT_API_URL, GitHubTransport, USER_AGENT};

use crate::error::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Status and body of an API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Raw response body
    pub body: String,
}

impl ApiResponse {
    /// Build a response by hand (dry runs, tests)
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

impl std::fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.body.is_empty() {
            write!(f, "{}", self.status)
        } else {
            write!(f, "{}: {}", self.status, self.body)
        }
    }
}

/// Request capability used by the reconciler
///
/// Paths are relative to the API root, e.g. `repos/o/r/pulls?state=open`.
/// Implementations never retry; retry policy belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET path`
    async fn get(&self, path: &str) -> Result<ApiResponse>;

    /// `POST path` with a JSON body
    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse>;

    /// `DELETE path`
    async fn delete(&self, path: &str) -> Result<ApiResponse>;
}
