//! Core types for merge-pr

use crate::platform::ApiResponse;
use serde::{Deserialize, Serialize};

/// A branch and the commit at its tip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Branch name (without `refs/heads/`)
    pub name: String,
    /// Git commit SHA (hex)
    pub sha: String,
}

/// Whether GitHub thinks a PR can be merged without conflicts
///
/// GitHub computes this asynchronously, so a freshly created or freshly
/// pushed PR often reports `null` for a while. `Unknown` is kept distinct so
/// that nobody treats "not computed yet" as "clean".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mergeability {
    /// No conflicts
    Clean,
    /// Has conflicts (or carries the conflict label)
    Conflicted,
    /// GitHub has not produced a verdict
    #[default]
    Unknown,
}

impl Mergeability {
    /// Map GitHub's nullable `mergeable` field
    pub const fn from_api(mergeable: Option<bool>) -> Self {
        match mergeable {
            Some(true) => Self::Clean,
            Some(false) => Self::Conflicted,
            None => Self::Unknown,
        }
    }

    /// `true` only for an explicit clean verdict
    pub const fn is_clean(self) -> bool {
        matches!(self, Self::Clean)
    }

    /// `true` only for an explicit conflict verdict
    pub const fn is_conflicted(self) -> bool {
        matches!(self, Self::Conflicted)
    }
}

impl std::fmt::Display for Mergeability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::Conflicted => write!(f, "conflicted"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// An open merge PR, either looked up or just created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// SHA at the tip of the PR's head branch
    pub head_sha: String,
    /// Last known mergeability
    pub mergeable: Mergeability,
}

/// Everything the reconciler needs to know about one merge flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct MergeRequest {
    /// Repository owner (user or organization)
    pub repo_owner: String,
    /// Repository name
    pub repo_name: String,
    /// Branch whose commits flow downstream
    pub src_branch: String,
    /// Branch receiving the merge PR
    pub dest_branch: String,
    /// Fast-forward and relabel an already open merge PR
    pub update_existing_pr: bool,
    /// Attach the `auto-merge` label to a newly created PR
    pub add_auto_merge_label: bool,
    /// Whether a pipeline (rather than a person) started this run
    pub is_auto_triggered: bool,
}

/// What happened during one reconciliation
///
/// | `pr_created` | `error` | meaning |
/// |---|---|---|
/// | `true` | `None` | PR created and labelled |
/// | `true` | `Some` | PR created, a later step (labelling) failed |
/// | `false` | `None` | nothing to do: PR already open, or nothing to merge |
/// | `false` | `Some` | a required step failed before a PR was created |
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// A new PR was opened by this call
    pub pr_created: bool,
    /// The response of the step that failed, verbatim
    pub error: Option<ApiResponse>,
}

/// Coarse classification of a [`MergeOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// PR created, no error
    Created,
    /// PR created, but a follow-up step failed
    CreatedWithError,
    /// Nothing created, nothing failed
    NoChange,
    /// Nothing created because a step failed
    Failed,
}

impl MergeOutcome {
    /// Nothing created, nothing failed
    pub const fn no_change() -> Self {
        Self {
            pr_created: false,
            error: None,
        }
    }

    /// PR created without error
    pub const fn created() -> Self {
        Self {
            pr_created: true,
            error: None,
        }
    }

    /// A step failed with the given response
    pub const fn failed(pr_created: bool, response: ApiResponse) -> Self {
        Self {
            pr_created,
            error: Some(response),
        }
    }

    /// Classify this outcome
    pub const fn status(&self) -> OutcomeStatus {
        match (self.pr_created, self.error.is_some()) {
            (true, false) => OutcomeStatus::Created,
            (true, true) => OutcomeStatus::CreatedWithError,
            (false, false) => OutcomeStatus::NoChange,
            (false, true) => OutcomeStatus::Failed,
        }
    }

    /// `true` when no step failed
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::CreatedWithError => write!(f, "created with error"),
            Self::NoChange => write!(f, "no change"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
