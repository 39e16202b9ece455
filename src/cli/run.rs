//! Run command - reconcile every flow in a flow file

use crate::cli::report_outcome;
use crate::cli::style::{CHECK, Stylize};
use crate::cli::{CommandContext, GlobalOptions};
use anstream::println;
use merge_pr::config::load_flows;
use merge_pr::error::Result;
use merge_pr::types::{MergeOutcome, OutcomeStatus};
use std::path::Path;
use tracing::info;

/// Tally of finished flows
#[derive(Debug, Default)]
struct Summary {
    created: usize,
    unchanged: usize,
    failed: usize,
}

/// Run the run command; returns `true` if every flow succeeded
///
/// Flows run one after another. A failed flow is reported and the rest
/// still run.
pub async fn run_flows(global: &GlobalOptions, config: &Path, manual: bool) -> Result<bool> {
    let requests = load_flows(config, !manual)?;
    let ctx = CommandContext::new(global).await?;

    println!(
        "{} {}",
        "Reconciling".emphasis(),
        format!("{} flow(s)...", requests.len()).accent()
    );
    if ctx.dry_run {
        println!("{}", "Dry run: no changes will be made".muted());
    }

    let mut summary = Summary::default();
    for request in &requests {
        info!(
            owner = %request.repo_owner,
            repo = %request.repo_name,
            src = %request.src_branch,
            dest = %request.dest_branch,
            "reconciling flow"
        );
        let result = ctx.reconciler.create_or_update_merge_pr(request).await;
        report_outcome(request, &result);

        match result.as_ref().map(MergeOutcome::status) {
            Ok(OutcomeStatus::Created) => summary.created += 1,
            Ok(OutcomeStatus::NoChange) => summary.unchanged += 1,
            // A PR with missing labels still counts against the run
            Ok(OutcomeStatus::CreatedWithError) => {
                summary.created += 1;
                summary.failed += 1;
            }
            Ok(OutcomeStatus::Failed) | Err(_) => summary.failed += 1,
        }
    }

    println!();
    let line = format!(
        "{} created, {} unchanged, {} failed",
        summary.created, summary.unchanged, summary.failed
    );
    if summary.failed == 0 {
        println!("{} {}", format!("{CHECK} Done:").success(), line);
    } else {
        println!("{} {}", "Done with failures:".warn(), line);
    }

    Ok(summary.failed == 0)
}
