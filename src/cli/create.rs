//! Create command - reconcile a single branch pair

use crate::cli::report_outcome;
use crate::cli::style::Stylize;
use crate::cli::{CommandContext, GlobalOptions};
use anstream::println;
use merge_pr::error::Result;
use merge_pr::types::MergeRequest;

/// Options for the create command
#[derive(Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CreateOptions {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Source branch
    pub src: String,
    /// Destination branch
    pub dest: String,
    /// Refresh an already open merge PR
    pub update_existing: bool,
    /// Label a new PR with `auto-merge`
    pub auto_merge: bool,
    /// Started by a person rather than a pipeline
    pub manual: bool,
}

/// Run the create command; returns `true` if the flow succeeded
pub async fn run_create(global: &GlobalOptions, options: CreateOptions) -> Result<bool> {
    let ctx = CommandContext::new(global).await?;

    if ctx.dry_run {
        println!("{}", "Dry run: no changes will be made".muted());
    }

    let request = MergeRequest {
        repo_owner: options.owner,
        repo_name: options.repo,
        src_branch: options.src,
        dest_branch: options.dest,
        update_existing_pr: options.update_existing,
        add_auto_merge_label: options.auto_merge,
        is_auto_triggered: !options.manual,
    };

    let result = ctx.reconciler.create_or_update_merge_pr(&request).await;
    Ok(report_outcome(&request, &result))
}
