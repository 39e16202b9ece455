//! Reconciliation execution - effectful operations
//!
//! Drives the merge branch and merge PR toward the state described by a
//! [`MergeRequest`], using the pure decisions in `plan` and the poller.

use crate::error::Result;
use crate::labels::LabelSet;
use crate::platform::{ApiResponse, Transport};
use crate::reconcile::api::{
    CreatedPull, GitRef, PullSummary, RepoContext, create_ref_body, update_ref_body,
};
use crate::reconcile::plan::{
    conflict_labels, merge_branch_name, new_pr_labels, pr_body, pr_title, reset_comment,
    should_fast_forward,
};
use crate::reconcile::poll::{PollConfig, poll_mergeability};
use crate::reconcile::{Halt, Step, require_success};
use crate::types::{BranchRef, MergeOutcome, MergeRequest, Mergeability, PullRequestRef};
use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, info, warn};

/// Creates, refreshes or leaves alone the merge PR for a branch pair
///
/// ```no_run
/// # async fn run() -> merge_pr::error::Result<()> {
/// use merge_pr::platform::{TransportConfig, create_transport};
/// use merge_pr::reconcile::Reconciler;
/// use merge_pr::types::MergeRequest;
///
/// let transport = create_transport(&TransportConfig::new("bot", "token", true))?;
/// let reconciler = Reconciler::new(transport);
/// let outcome = reconciler
///     .create_or_update_merge_pr(&MergeRequest {
///         repo_owner: "octo".into(),
///         repo_name: "widgets".into(),
///         src_branch: "main".into(),
///         dest_branch: "release".into(),
///         update_existing_pr: true,
///         add_auto_merge_label: false,
///         is_auto_triggered: true,
///     })
///     .await?;
/// println!("{}", outcome.status());
/// # Ok(())
/// # }
/// ```
pub struct Reconciler {
    transport: Box<dyn Transport>,
    poll_config: PollConfig,
}

impl Reconciler {
    /// Reconciler with the default polling budget
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            poll_config: PollConfig::default(),
        }
    }

    /// Override the polling budget
    #[must_use]
    pub const fn with_poll_config(mut self, poll_config: PollConfig) -> Self {
        self.poll_config = poll_config;
        self
    }

    /// Make sure an up-to-date merge PR exists for `request`
    ///
    /// HTTP failures come back inside the [`MergeOutcome`]; only transport
    /// faults and undecodable 2xx bodies are `Err`.
    pub async fn create_or_update_merge_pr(&self, request: &MergeRequest) -> Result<MergeOutcome> {
        let ctx = RepoContext::new(&request.repo_owner, &request.repo_name);
        match self.reconcile(&ctx, request).await {
            Ok(outcome) => Ok(outcome),
            Err(halt) => halt.into_outcome(false),
        }
    }

    async fn reconcile(&self, ctx: &RepoContext, request: &MergeRequest) -> Step<MergeOutcome> {
        let src = self.resolve_branch(ctx, &request.src_branch).await?;

        let title = pr_title(&request.src_branch, &request.dest_branch);
        let branch = merge_branch_name(&request.src_branch, &request.dest_branch);

        let existing = self
            .find_merge_pr(ctx, &request.dest_branch, &branch, &title)
            .await?;

        match existing {
            Some(pr) if request.update_existing_pr => {
                self.update_existing(ctx, pr, &src, &branch).await
            }
            Some(pr) => {
                info!(
                    pr_number = pr.number,
                    title = %pr.title,
                    "merge PR already open, leaving it alone"
                );
                Ok(MergeOutcome::no_change())
            }
            None => self.create_new(ctx, request, &src, &branch, &title).await,
        }
    }

    /// Look up the tip of `name`
    async fn resolve_branch(&self, ctx: &RepoContext, name: &str) -> Step<BranchRef> {
        debug!(branch = name, "resolving branch");
        let response =
            require_success(self.transport.get(&ctx.branch_lookup_path(name)).await?)?;
        let git_ref: GitRef = response.json()?;

        debug!(branch = name, sha = %git_ref.object.sha, "resolved branch");
        Ok(BranchRef {
            name: name.to_string(),
            sha: git_ref.object.sha,
        })
    }

    /// Find the open merge PR, matched by exact title
    async fn find_merge_pr(
        &self,
        ctx: &RepoContext,
        base: &str,
        head: &str,
        title: &str,
    ) -> Step<Option<PullRequestRef>> {
        debug!(base, head, "finding existing merge PR");
        let response =
            require_success(self.transport.get(&ctx.open_pulls_path(base, head)).await?)?;
        let pulls: Vec<PullSummary> = response.json()?;

        let found = pulls
            .into_iter()
            .find(|pr| pr.title == title)
            .map(|pr| PullRequestRef {
                number: pr.number,
                title: pr.title,
                head_sha: pr.head.sha,
                mergeable: Mergeability::Unknown,
            });

        if let Some(ref pr) = found {
            debug!(pr_number = pr.number, head_sha = %pr.head_sha, "found existing merge PR");
        } else {
            debug!("no existing merge PR found");
        }
        Ok(found)
    }

    /// Update path: fast-forward a clean PR, flag a conflicted one
    async fn update_existing(
        &self,
        ctx: &RepoContext,
        mut pr: PullRequestRef,
        src: &BranchRef,
        branch: &str,
    ) -> Step<MergeOutcome> {
        info!(pr_number = pr.number, title = %pr.title, "updating existing merge PR");
        pr.mergeable = self.poll(ctx, pr.number).await?;

        if should_fast_forward(pr.mergeable, &pr.head_sha, &src.sha) {
            let response = self.reset_branch(ctx, branch, &src.sha, false).await?;
            if !response.is_success() {
                warn!(
                    status = %response.status,
                    "There's additional change in `{}` but an attempt to fast-forward `{branch}` failed",
                    src.name
                );
                return Ok(MergeOutcome::failed(false, response));
            }

            let comment = reset_comment(branch, &src.sha);
            let response = self
                .transport
                .post_json(&ctx.comments_path(pr.number), &json!({ "body": comment }))
                .await?;
            if !response.is_success() {
                warn!(pr_number = pr.number, status = %response.status, "failed to post reset comment");
            }

            // The new head needs a fresh verdict
            pr.head_sha.clone_from(&src.sha);
            pr.mergeable = self.poll(ctx, pr.number).await?;
        }

        // Conflicts can also come from the destination moving, so check even
        // when the branch was left alone
        if pr.mergeable.is_conflicted() {
            info!(pr_number = pr.number, "merge PR has conflicts, adding label");
            let response = self.add_labels(ctx, pr.number, &conflict_labels()).await?;
            if !response.is_success() {
                warn!(pr_number = pr.number, status = %response.status, "failed to add conflict label");
            }
        }

        Ok(MergeOutcome::no_change())
    }

    /// Create path: branch, PR, verdict, labels
    async fn create_new(
        &self,
        ctx: &RepoContext,
        request: &MergeRequest,
        src: &BranchRef,
        branch: &str,
        title: &str,
    ) -> Step<MergeOutcome> {
        info!(branch, sha = %src.sha, "creating branch");
        let response = self
            .transport
            .post_json(&ctx.refs_path(), &create_ref_body(branch, &src.sha))
            .await?;

        if response.status == StatusCode::UNPROCESSABLE_ENTITY {
            // Left over from a run whose PR was closed; take it over
            info!(branch, "branch already exists, resetting");
            let reset = self.reset_branch(ctx, branch, &src.sha, true).await?;
            if !reset.is_success() {
                return Ok(MergeOutcome::failed(false, reset));
            }
        } else if !response.is_success() {
            return Ok(MergeOutcome::failed(false, response));
        }

        info!(head = branch, base = %request.dest_branch, "creating PR");
        let body = pr_body(
            &request.src_branch,
            &request.dest_branch,
            branch,
            request.is_auto_triggered,
        );
        let response = self
            .transport
            .post_json(
                &ctx.pulls_path(),
                &json!({
                    "title": title,
                    "body": body,
                    "head": branch,
                    "base": request.dest_branch,
                }),
            )
            .await?;

        // No commits to merge: dest already contains src
        if response.status == StatusCode::UNPROCESSABLE_ENTITY {
            info!(branch, "nothing to merge, deleting branch");
            let deleted = self.transport.delete(&ctx.branch_ref_path(branch)).await?;
            if !deleted.is_success() {
                warn!(branch, status = %deleted.status, "failed to delete unused merge branch");
            }
            return Ok(MergeOutcome::no_change());
        }
        if !response.is_success() {
            return Ok(MergeOutcome::failed(false, response));
        }

        let created: CreatedPull = response.json()?;
        info!(pr_number = created.number, "created PR");

        // From here on the PR exists, whatever else fails
        match self.label_new_pr(ctx, request, &created).await {
            Ok(outcome) => Ok(outcome),
            Err(Halt::Rejected(response)) => Ok(MergeOutcome::failed(true, response)),
            Err(fault @ Halt::Fault(_)) => Err(fault),
        }
    }

    async fn label_new_pr(
        &self,
        ctx: &RepoContext,
        request: &MergeRequest,
        created: &CreatedPull,
    ) -> Step<MergeOutcome> {
        let mergeable = match created.mergeable {
            Some(value) => Mergeability::from_api(Some(value)),
            None => self.poll(ctx, created.number).await?,
        };

        if mergeable.is_conflicted() {
            info!(pr_number = created.number, "PR has merge conflicts, adding label");
        }

        let labels = new_pr_labels(request.add_auto_merge_label, mergeable);
        let response = self.add_labels(ctx, created.number, &labels).await?;
        if !response.is_success() {
            warn!(pr_number = created.number, status = %response.status, "failed to add labels");
            return Ok(MergeOutcome::failed(true, response));
        }

        Ok(MergeOutcome::created())
    }

    async fn poll(&self, ctx: &RepoContext, pr_number: u64) -> Step<Mergeability> {
        debug!(pr_number, "waiting for mergeable status");
        let mergeable =
            poll_mergeability(self.transport.as_ref(), &ctx.pull_path(pr_number), self.poll_config)
                .await?;
        debug!(pr_number, %mergeable, "mergeable status");
        Ok(mergeable)
    }

    /// Move `branch` to `sha`; without `force` only fast-forwards succeed
    async fn reset_branch(
        &self,
        ctx: &RepoContext,
        branch: &str,
        sha: &str,
        force: bool,
    ) -> Result<ApiResponse> {
        info!(branch, sha, force, "resetting branch");
        self.transport
            .post_json(&ctx.branch_ref_path(branch), &update_ref_body(sha, force))
            .await
    }

    async fn add_labels(
        &self,
        ctx: &RepoContext,
        pr_number: u64,
        labels: &LabelSet,
    ) -> Result<ApiResponse> {
        debug!(pr_number, count = labels.len(), "adding labels");
        self.transport
            .post_json(&ctx.labels_path(pr_number), &serde_json::to_value(labels)?)
            .await
    }
}
