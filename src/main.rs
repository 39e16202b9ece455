//! merge-pr CLI
//!
//! Usage:
//!   merge-pr create --owner octo --repo widgets --src main --dest release/2.0
//!   merge-pr run --config merges.toml
//!   merge-pr auth

mod cli;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use cli::{CreateOptions, GlobalOptions, run_auth, run_create, run_flows};
use merge_pr::platform::DEFAULT_API_URL;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "merge-pr")]
#[command(version)]
#[command(about = "Keep downstream branches in sync with merge pull requests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show what would be done without changing anything on GitHub
    #[arg(long, global = true)]
    dry_run: bool,

    /// GitHub username for basic auth
    #[arg(long, env = "GITHUB_USERNAME", global = true)]
    username: Option<String>,

    /// GitHub token (falls back to GITHUB_TOKEN, GH_TOKEN, then `gh auth token`)
    #[arg(long, global = true)]
    token: Option<String>,

    /// GitHub API root (for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or refresh the merge PR for one branch pair
    Create {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,

        /// Repository name
        #[arg(long)]
        repo: String,

        /// Branch to merge from
        #[arg(long)]
        src: String,

        /// Branch to merge into
        #[arg(long)]
        dest: String,

        /// Fast-forward and relabel an already open merge PR
        #[arg(long)]
        update_existing: bool,

        /// Add the auto-merge label to a new PR
        #[arg(long)]
        auto_merge: bool,

        /// Mark the PR as created by a manual run
        #[arg(long)]
        manual: bool,
    },
    /// Reconcile every flow listed in a TOML flow file
    Run {
        /// Flow file
        #[arg(long, short)]
        config: PathBuf,

        /// Mark created PRs as coming from a manual run
        #[arg(long)]
        manual: bool,
    },
    /// Check GitHub credentials
    Auth,
}

/// Initialize tracing with the given verbosity level
///
/// - 0: warn (default)
/// - 1: info (-v)
/// - 2: debug (-vv)
/// - 3+: trace (-vvv)
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Allow RUST_LOG to override if set
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let global = GlobalOptions {
        username: cli.username,
        token: cli.token,
        api_url: cli.api_url,
        dry_run: cli.dry_run,
    };

    let succeeded = match cli.command {
        Commands::Create {
            owner,
            repo,
            src,
            dest,
            update_existing,
            auto_merge,
            manual,
        } => {
            run_create(
                &global,
                CreateOptions {
                    owner,
                    repo,
                    src,
                    dest,
                    update_existing,
                    auto_merge,
                    manual,
                },
            )
            .await?
        }
        Commands::Run { config, manual } => run_flows(&global, &config, manual).await?,
        Commands::Auth => {
            run_auth(&global).await?;
            true
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
