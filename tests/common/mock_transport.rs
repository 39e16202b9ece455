//! Mock transport for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use merge_pr::error::{Error, Result};
use merge_pr::platform::{ApiResponse, Transport};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// HTTP verb of a recorded call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Call record
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct State {
    // Queued responses per route; the last one repeats
    routes: Mutex<HashMap<(Method, String), VecDeque<ApiResponse>>>,
    // Call tracking
    calls: Mutex<Vec<Call>>,
    // Error injection
    faults: Mutex<Vec<(Method, String)>>,
}

/// Scripted transport for reconciler tests
///
/// Cloning shares state, so a test can hand one clone to the reconciler and
/// inspect calls through another.
///
/// Features:
/// - Responses scripted per (method, path), queued in order
/// - Call tracking for verification
/// - Fault injection for transport-failure testing
/// - Unscripted routes answer 404 with an "unscripted" body
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<State>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path`
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state
            .routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(ApiResponse::new(status, body.to_string()));
    }

    /// Make `method path` fail below HTTP
    pub fn fault(&self, method: Method, path: &str) {
        self.state
            .faults
            .lock()
            .unwrap()
            .push((method, path.to_string()));
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Calls to one route
    pub fn calls_to(&self, method: Method, path: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }

    /// Number of calls to one route
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls_to(method, path).len()
    }

    /// All writes (POST and DELETE)
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method != Method::Get)
            .collect()
    }

    fn handle(&self, method: Method, path: &str, body: Option<&Value>) -> Result<ApiResponse> {
        self.state.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        let key = (method, path.to_string());
        if self.state.faults.lock().unwrap().contains(&key) {
            return Err(Error::Internal(format!("injected fault: {method:?} {path}")));
        }

        let mut routes = self.state.routes.lock().unwrap();
        let response = match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue.front().cloned().unwrap(),
            _ => ApiResponse::new(
                StatusCode::NOT_FOUND,
                format!(r#"{{"message":"unscripted {method:?} {path}"}}"#),
            ),
        };
        Ok(response)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.handle(Method::Get, path, None)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.handle(Method::Post, path, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.handle(Method::Delete, path, None)
    }
}
