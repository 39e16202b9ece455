//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by the create, run and auth commands.

use merge_pr::auth::get_github_auth;
use merge_pr::error::Result;
use merge_pr::platform::{TransportConfig, create_transport};
use merge_pr::reconcile::Reconciler;
use tracing::debug;

/// Options every command accepts
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit username (falls back to `GITHUB_USERNAME`)
    pub username: Option<String>,
    /// Explicit token (falls back to env vars, then `gh auth token`)
    pub token: Option<String>,
    /// API root
    pub api_url: String,
    /// Suppress every write
    pub dry_run: bool,
}

/// Shared context for CLI commands that talk to GitHub
///
/// Resolves credentials once and builds the transport the reconciler uses.
pub struct CommandContext {
    /// Reconciler bound to the selected transport
    pub reconciler: Reconciler,
    /// Whether writes are suppressed
    pub dry_run: bool,
}

impl CommandContext {
    /// Resolve credentials and build the transport
    pub async fn new(options: &GlobalOptions) -> Result<Self> {
        let auth = get_github_auth(options.username.as_deref(), options.token.as_deref()).await?;
        debug!(source = %auth.source, "resolved GitHub credentials");

        let config = TransportConfig {
            api_url: options.api_url.clone(),
            username: auth.username,
            token: auth.token,
            dry_run: options.dry_run,
        };
        debug!(?config, "building transport");
        let transport = create_transport(&config)?;

        Ok(Self {
            reconciler: Reconciler::new(transport),
            dry_run: options.dry_run,
        })
    }
}
