//! Dry-run transport: reads go through, writes are only recorded

use crate::error::Result;
use crate::platform::{ApiResponse, Transport};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Mutex;
use tracing::info;

/// Body returned for every suppressed write
///
/// Shaped like a freshly created, conflict-free pull request so that the
/// create path runs to completion without polling a PR that does not exist.
pub const DRY_RUN_BODY: &str = r#"{"number":0,"mergeable":true,"dry_run":true}"#;

/// A write that was suppressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// `POST` or `DELETE`
    pub method: &'static str,
    /// Request path
    pub path: String,
    /// JSON body, if any
    pub body: Option<serde_json::Value>,
}

/// Wraps another transport and suppresses every mutating call
pub struct DryRunTransport<T> {
    inner: T,
    recorded: Mutex<Vec<RecordedCall>>,
}

impl<T: Transport> DryRunTransport<T> {
    /// Wrap `inner`; only its `get` will ever be called
    pub const fn new(inner: T) -> Self {
        Self {
            inner,
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Writes suppressed so far, in order
    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.recorded
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) -> ApiResponse {
        info!(method = call.method, path = %call.path, "dry run: skipping request");
        if let Ok(mut calls) = self.recorded.lock() {
            calls.push(call);
        }
        ApiResponse::new(StatusCode::CREATED, DRY_RUN_BODY)
    }
}

#[async_trait]
impl<T: Transport> Transport for DryRunTransport<T> {
    async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.inner.get(path).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse> {
        Ok(self.record(RecordedCall {
            method: "POST",
            path: path.to_string(),
            body: Some(body.clone()),
        }))
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse> {
        Ok(self.record(RecordedCall {
            method: "DELETE",
            path: path.to_string(),
            body: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    /// Answers reads with a fixed body and refuses writes
    struct ReadOnly;

    #[async_trait]
    impl Transport for ReadOnly {
        async fn get(&self, path: &str) -> Result<ApiResponse> {
            Ok(ApiResponse::new(StatusCode::OK, format!("\"{path}\"")))
        }

        async fn post_json(&self, _path: &str, _body: &serde_json::Value) -> Result<ApiResponse> {
            Err(Error::Internal("write reached inner transport".to_string()))
        }

        async fn delete(&self, _path: &str) -> Result<ApiResponse> {
            Err(Error::Internal("write reached inner transport".to_string()))
        }
    }

    #[tokio::test]
    async fn test_get_passes_through() {
        let transport = DryRunTransport::new(ReadOnly);
        let response = transport.get("repos/o/r/pulls/1").await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "\"repos/o/r/pulls/1\"");
        assert!(transport.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_writes_are_recorded_not_sent() {
        let transport = DryRunTransport::new(ReadOnly);

        let created = transport
            .post_json("repos/o/r/git/refs", &json!({"ref": "refs/heads/x"}))
            .await
            .unwrap();
        let deleted = transport.delete("repos/o/r/git/refs/heads/x").await.unwrap();

        assert!(created.is_success());
        assert!(deleted.is_success());

        let calls = transport.recorded();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].body, Some(json!({"ref": "refs/heads/x"})));
        assert_eq!(calls[1].method, "DELETE");
        assert_eq!(calls[1].path, "repos/o/r/git/refs/heads/x");
    }

    #[tokio::test]
    async fn test_canned_body_looks_like_a_clean_pr() {
        let transport = DryRunTransport::new(ReadOnly);
        let response = transport
            .post_json("repos/o/r/pulls", &json!({}))
            .await
            .unwrap();
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["number"], 0);
        assert_eq!(value["mergeable"], true);
    }
}
