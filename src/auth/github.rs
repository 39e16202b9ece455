//! GitHub credential lookup

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use crate::platform::Transport;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

/// Username used with token auth when none is given
///
/// GitHub ignores the username for token-based basic auth, but it has to be
/// non-empty.
pub const DEFAULT_USERNAME: &str = "x-access-token";

/// Token environment variables, in priority order
const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Username environment variable
const USERNAME_VAR: &str = "GITHUB_USERNAME";

/// Resolved GitHub credentials
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Basic-auth username
    pub username: String,
    /// Basic-auth password or token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn resolve_username<F>(username: Option<&str>, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(username.map(ToString::to_string))
        .or_else(|| non_empty(lookup(USERNAME_VAR)))
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string())
}

/// Resolve credentials from explicit values and an environment lookup
///
/// Does not consult the `gh` CLI. `lookup` is `std::env::var` in production
/// and a plain map in tests.
pub fn resolve_from_env<F>(
    username: Option<&str>,
    token: Option<&str>,
    lookup: F,
) -> Option<GitHubAuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let username = resolve_username(username, &lookup);

    if let Some(token) = non_empty(token.map(ToString::to_string)) {
        return Some(GitHubAuthConfig {
            username,
            token,
            source: AuthSource::Flag,
        });
    }

    TOKEN_VARS
        .iter()
        .copied()
        .find_map(|var| non_empty(lookup(var)))
        .map(|token| GitHubAuthConfig {
            username,
            token,
            source: AuthSource::EnvVar,
        })
}

/// Ask the `gh` CLI for its token
async fn gh_cli_token() -> Option<String> {
    let output = Command::new("gh").args(["auth", "token"]).output().await.ok()?;
    if !output.status.success() {
        debug!(status = %output.status, "gh auth token failed");
        return None;
    }
    non_empty(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
}

/// Find GitHub credentials: flag, then environment, then `gh auth token`
pub async fn get_github_auth(
    username: Option<&str>,
    token: Option<&str>,
) -> Result<GitHubAuthConfig> {
    if let Some(config) = resolve_from_env(username, token, |var| std::env::var(var).ok()) {
        debug!(source = %config.source, "using GitHub token");
        return Ok(config);
    }

    if let Some(token) = gh_cli_token().await {
        debug!(source = %AuthSource::Cli, "using GitHub token");
        return Ok(GitHubAuthConfig {
            username: resolve_username(username, &|var: &str| std::env::var(var).ok()),
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(
        "No GitHub token found. Pass --token, set GITHUB_TOKEN or GH_TOKEN, or run 'gh auth login'."
            .to_string(),
    ))
}

/// Check credentials by fetching the authenticated user; returns the login
pub async fn test_github_auth(transport: &dyn Transport) -> Result<String> {
    #[derive(Deserialize)]
    struct User {
        login: String,
    }

    let response = transport.get("user").await?;
    if !response.is_success() {
        return Err(Error::Auth(format!("GitHub rejected credentials: {response}")));
    }
    let user: User = response.json()?;
    Ok(user.login)
}
