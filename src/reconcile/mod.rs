//! Merge-PR reconciliation
//!
//! Split the same way as the rest of the crate's effectful code:
//! 1. Plan - names, PR text and label decisions (pure, testable)
//! 2. Poll - bounded wait for GitHub's mergeability verdict
//! 3. Execute - the branch/PR state machine, talking to a [`Transport`]
//!
//! [`Transport`]: crate::platform::Transport

mod api;
mod execute;
mod plan;
mod poll;

pub use execute::Reconciler;
pub use plan::{
    conflict_labels, merge_branch_name, new_pr_labels, pr_body, pr_title, reset_comment,
    should_fast_forward,
};
pub use poll::{DEFAULT_DELAY, DEFAULT_MAX_ATTEMPTS, PollConfig};

use crate::error::{Error, Result};
use crate::platform::ApiResponse;
use crate::types::MergeOutcome;

/// Why a reconciliation path stopped early
#[derive(Debug)]
pub(crate) enum Halt {
    /// A required request came back non-2xx
    Rejected(ApiResponse),
    /// Failure below HTTP
    Fault(Error),
}

impl From<Error> for Halt {
    fn from(error: Error) -> Self {
        Self::Fault(error)
    }
}

impl Halt {
    /// Turn a rejection into an outcome; faults keep propagating
    pub(crate) fn into_outcome(self, pr_created: bool) -> Result<MergeOutcome> {
        match self {
            Self::Rejected(response) => Ok(MergeOutcome::failed(pr_created, response)),
            Self::Fault(error) => Err(error),
        }
    }
}

/// Result of a reconciliation step
pub(crate) type Step<T> = std::result::Result<T, Halt>;

/// Pass 2xx responses through, halt on anything else
pub(crate) fn require_success(response: ApiResponse) -> Step<ApiResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(Halt::Rejected(response))
    }
}
