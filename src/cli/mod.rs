//! CLI command implementations

mod auth;
mod context;
mod create;
mod run;
pub mod style;

pub use auth::run_auth;
pub use context::{CommandContext, GlobalOptions};
pub use create::{CreateOptions, run_create};
pub use run::run_flows;

use anstream::{eprintln, println};
use merge_pr::error::Error;
use merge_pr::types::{MergeOutcome, MergeRequest, OutcomeStatus};
use style::{Stylize, arrow, check, cross};

/// Print one line for a finished flow; returns `true` if it succeeded
pub fn report_outcome(request: &MergeRequest, result: &Result<MergeOutcome, Error>) -> bool {
    let flow = format!(
        "{}/{} {} {} {}",
        request.repo_owner,
        request.repo_name,
        request.src_branch.accent(),
        arrow(),
        request.dest_branch.accent()
    );

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("{} {flow}: {}", cross(), "error".failure());
            eprintln!("  {e}");
            return false;
        }
    };

    match outcome.status() {
        OutcomeStatus::Created => {
            println!("{} {flow}: {}", check(), "created merge PR".success());
        }
        OutcomeStatus::NoChange => {
            println!("{} {flow}: {}", check(), "no change".muted());
        }
        OutcomeStatus::CreatedWithError => {
            println!(
                "{} {flow}: {}",
                "!".warn(),
                "created merge PR, but a follow-up step failed".warn()
            );
        }
        OutcomeStatus::Failed => {
            println!("{} {flow}: {}", cross(), "failed".failure());
        }
    }

    if let Some(ref response) = outcome.error {
        eprintln!("  {}", response.status.to_string().failure());
        if !response.body.is_empty() {
            eprintln!("  {}", response.body.muted());
        }
    }

    outcome.is_success()
}
