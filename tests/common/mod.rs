//! Shared test fixtures

#![allow(dead_code)]

mod mock_transport;

pub use mock_transport::{Call, Method, MockTransport};

use merge_pr::reconcile::{PollConfig, Reconciler};
use merge_pr::types::MergeRequest;
use serde_json::json;

pub const OWNER: &str = "octo";
pub const REPO: &str = "widgets";
pub const SRC: &str = "main";
pub const DEST: &str = "release";

pub const TITLE: &str = "Merge main to release";
pub const BRANCH: &str = "merges/main-to-release";

pub const SRC_REF: &str = "repos/octo/widgets/git/ref/heads/main";
pub const OPEN_PULLS: &str =
    "repos/octo/widgets/pulls?state=open&base=release&head=octo%3Amerges%2Fmain-to-release";
pub const REFS: &str = "repos/octo/widgets/git/refs";
pub const BRANCH_REF: &str = "repos/octo/widgets/git/refs/heads/merges/main-to-release";
pub const PULLS: &str = "repos/octo/widgets/pulls";

pub fn pull(number: u64) -> String {
    format!("repos/octo/widgets/pulls/{number}")
}

pub fn labels(number: u64) -> String {
    format!("repos/octo/widgets/issues/{number}/labels")
}

pub fn comments(number: u64) -> String {
    format!("repos/octo/widgets/issues/{number}/comments")
}

/// Request for main -> release in octo/widgets
pub fn request(update_existing_pr: bool, add_auto_merge_label: bool) -> MergeRequest {
    MergeRequest {
        repo_owner: OWNER.to_string(),
        repo_name: REPO.to_string(),
        src_branch: SRC.to_string(),
        dest_branch: DEST.to_string(),
        update_existing_pr,
        add_auto_merge_label,
        is_auto_triggered: true,
    }
}

/// Reconciler over `mock` that polls without sleeping
pub fn reconciler(mock: &MockTransport) -> Reconciler {
    Reconciler::new(Box::new(mock.clone())).with_poll_config(PollConfig::immediate(5))
}

impl MockTransport {
    /// Source branch resolves to `sha`
    pub fn src_tip(&self, sha: &str) {
        self.respond(
            Method::Get,
            SRC_REF,
            200,
            json!({ "ref": "refs/heads/main", "object": { "sha": sha, "type": "commit" } }),
        );
    }

    /// No open merge PR
    pub fn no_open_pr(&self) {
        self.respond(Method::Get, OPEN_PULLS, 200, json!([]));
    }

    /// An open merge PR with the expected title
    pub fn open_pr(&self, number: u64, head_sha: &str) {
        self.respond(
            Method::Get,
            OPEN_PULLS,
            200,
            json!([{ "number": number, "title": TITLE, "head": { "sha": head_sha } }]),
        );
    }

    /// Queue a PR-detail response for polling
    pub fn pr_detail(&self, number: u64, mergeable: Option<bool>, label_names: &[&str]) {
        let labels: Vec<_> = label_names.iter().map(|n| json!({ "name": n })).collect();
        self.respond(
            Method::Get,
            &pull(number),
            200,
            json!({ "number": number, "mergeable": mergeable, "labels": labels }),
        );
    }

    /// Branch creation answers `status`
    pub fn create_branch(&self, status: u16) {
        self.respond(Method::Post, REFS, status, json!({}));
    }

    /// PR creation answers `status` with `body`
    pub fn create_pr(&self, status: u16, body: serde_json::Value) {
        self.respond(Method::Post, PULLS, status, body);
    }

    /// Label application answers `status`
    pub fn add_labels(&self, number: u64, status: u16) {
        self.respond(Method::Post, &labels(number), status, json!([]));
    }

    /// Ref update answers `status`
    pub fn reset_branch(&self, status: u16) {
        self.respond(Method::Post, BRANCH_REF, status, json!({}));
    }
}
