//! Auth command - check GitHub credentials

use crate::cli::GlobalOptions;
use crate::cli::style::{Stylize, check};
use anstream::println;
use merge_pr::auth::{get_github_auth, test_github_auth};
use merge_pr::error::Result;
use merge_pr::platform::GitHubTransport;

/// Run the auth command
pub async fn run_auth(global: &GlobalOptions) -> Result<()> {
    let auth = get_github_auth(global.username.as_deref(), global.token.as_deref()).await?;
    println!("{}", format!("Token from {}", auth.source).muted());

    // Read-only, so always live
    let transport = GitHubTransport::new(&global.api_url, &auth.username, &auth.token)?;
    let login = test_github_auth(&transport).await?;

    println!("{} Authenticated as {}", check(), login.accent());
    Ok(())
}
