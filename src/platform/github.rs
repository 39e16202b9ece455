//! Live GitHub transport

use crate::error::{Error, Result};
use crate::platform::{ApiResponse, Transport};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com/";

/// Media type sent with every request
///
/// The preview type unlocks the check-runs endpoints alongside the regular
/// v3 API.
pub const ACCEPT_HEADER: &str = "application/vnd.github.antiope-preview+json";

/// User-agent sent with every request
pub const USER_AGENT: &str = "merge-pr";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport that performs real HTTP calls with basic auth
pub struct GitHubTransport {
    client: Client,
    base_url: Url,
}

impl GitHubTransport {
    /// Create a transport rooted at `api_url`
    pub fn new(api_url: &str, username: &str, token: &str) -> Result<Self> {
        // Url::join drops the last path segment unless the base ends in '/'
        let base_url = if api_url.ends_with('/') {
            Url::parse(api_url)?
        } else {
            Url::parse(&format!("{api_url}/"))?
        };

        let credentials = STANDARD.encode(format!("{username}:{token}"));
        let mut auth = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(|e| Error::Auth(format!("invalid credentials: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// API root requests are resolved against
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn read_response(response: Response) -> Result<ApiResponse> {
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "received response");
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl Transport for GitHubTransport {
    async fn get(&self, path: &str) -> Result<ApiResponse> {
        debug!(path, "GET");
        let response = self.client.get(self.url(path)?).send().await?;
        Self::read_response(response).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse> {
        debug!(path, "POST");
        let response = self.client.post(self.url(path)?).json(body).send().await?;
        Self::read_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse> {
        debug!(path, "DELETE");
        let response = self.client.delete(self.url(path)?).send().await?;
        Self::read_response(response).await
    }
}
