//! Reconciliation planning - pure functions
//!
//! Names, PR text and label decisions. No I/O happens here, so everything
//! is derived from the inputs alone and re-runs land on the same branch and
//! PR.

use crate::labels::{AREA_INFRASTRUCTURE_LABEL, AUTO_MERGE_LABEL, LabelSet, MERGE_CONFLICTS_LABEL};
use crate::types::Mergeability;

/// Title of the merge PR for `src` into `dest`
pub fn pr_title(src: &str, dest: &str) -> String {
    format!("Merge {src} to {dest}")
}

/// Name of the branch that hosts the merge PR's commits
pub fn merge_branch_name(src: &str, dest: &str) -> String {
    format!("merges/{src}-to-{dest}")
}

/// Body of a newly created merge PR
///
/// Includes the commands a human runs to resolve conflicts locally.
pub fn pr_body(src: &str, dest: &str, branch: &str, is_auto_triggered: bool) -> String {
    let manual_note = if is_auto_triggered {
        ""
    } else {
        "(created from a manual run of the PR generation tool)\n"
    };

    format!(
        "This is an automatically generated pull request from {src} into {dest}.
{manual_note}
``` bash
git fetch --all
git checkout {branch}
git reset --hard upstream/{dest}
git merge upstream/{src}
# Fix merge conflicts
git commit
git push upstream {branch} --force
```
Once all conflicts are resolved and all the tests pass, you are free to merge the pull request."
    )
}

/// Comment posted after fast-forwarding an existing merge PR
pub fn reset_comment(branch: &str, sha: &str) -> String {
    format!("Reset HEAD of `{branch}` to `{sha}`")
}

/// Whether an existing merge PR should be fast-forwarded to `src_sha`
///
/// Only a PR known to be conflict-free is touched. A conflicted PR may carry
/// a human's resolution commits, and an unknown one may too.
pub fn should_fast_forward(mergeable: Mergeability, head_sha: &str, src_sha: &str) -> bool {
    mergeable.is_clean() && head_sha != src_sha
}

/// Labels for a newly created merge PR
pub fn new_pr_labels(add_auto_merge_label: bool, mergeable: Mergeability) -> LabelSet {
    let mut labels = LabelSet::new();
    labels.insert(AREA_INFRASTRUCTURE_LABEL);
    if add_auto_merge_label {
        labels.insert(AUTO_MERGE_LABEL);
    }
    if mergeable.is_conflicted() {
        labels.insert(MERGE_CONFLICTS_LABEL);
    }
    labels
}

/// Labels added to an existing merge PR found to be conflicted
pub fn conflict_labels() -> LabelSet {
    std::iter::once(MERGE_CONFLICTS_LABEL).collect()
}
