//! Transport selection

use crate::error::Result;
use crate::platform::{DEFAULT_API_URL, DryRunTransport, GitHubTransport, Transport};
use tracing::debug;

/// Construction-time settings for a transport
#[derive(Clone)]
pub struct TransportConfig {
    /// API root, e.g. `https://api.github.com/`
    pub api_url: String,
    /// Basic-auth username
    pub username: String,
    /// Basic-auth password or token
    pub token: String,
    /// Suppress every write
    pub dry_run: bool,
}

impl TransportConfig {
    /// Config for the public GitHub API
    pub fn new(username: impl Into<String>, token: impl Into<String>, dry_run: bool) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            username: username.into(),
            token: token.into(),
            dry_run,
        }
    }
}

impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportConfig")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

/// Build the live transport, wrapped in [`DryRunTransport`] when requested
pub fn create_transport(config: &TransportConfig) -> Result<Box<dyn Transport>> {
    let live = GitHubTransport::new(&config.api_url, &config.username, &config.token)?;
    debug!(api_url = %live.base_url(), dry_run = config.dry_run, "created transport");

    if config.dry_run {
        Ok(Box::new(DryRunTransport::new(live)))
    } else {
        Ok(Box::new(live))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let config = TransportConfig::new("bot", "ghp_secret", false);
        let printed = format!("{config:?}");
        assert!(printed.contains("bot"));
        assert!(!printed.contains("ghp_secret"));
    }

    #[test]
    fn test_create_transport_rejects_bad_url() {
        let mut config = TransportConfig::new("bot", "token", true);
        config.api_url = "::".to_string();
        assert!(create_transport(&config).is_err());
    }
}
