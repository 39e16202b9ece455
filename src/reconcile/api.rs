//! GitHub REST paths and response shapes used by the reconciler

use serde::Deserialize;
use serde_json::json;

/// `GET git/ref/heads/{branch}`
#[derive(Debug, Deserialize)]
pub(crate) struct GitRef {
    pub object: GitObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitObject {
    pub sha: String,
}

/// Item of `GET pulls`
#[derive(Debug, Deserialize)]
pub(crate) struct PullSummary {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub head: PullHead,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullHead {
    pub sha: String,
}

/// Response of `POST pulls`
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedPull {
    pub number: u64,
    #[serde(default)]
    pub mergeable: Option<bool>,
}

/// `GET pulls/{number}`, trimmed to what polling needs
#[derive(Debug, Deserialize)]
pub(crate) struct PullDetail {
    #[serde(default)]
    pub mergeable: Option<bool>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Label {
    pub name: String,
}

/// Repository a reconciliation runs against
///
/// Builds every path the reconciler requests so the owner and repo are
/// passed around explicitly rather than captured.
#[derive(Debug, Clone)]
pub(crate) struct RepoContext {
    pub owner: String,
    pub repo: String,
}

impl RepoContext {
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    fn base(&self) -> String {
        format!("repos/{}/{}", self.owner, self.repo)
    }

    /// Exact-match lookup of a single branch
    pub fn branch_lookup_path(&self, branch: &str) -> String {
        format!("{}/git/ref/heads/{}", self.base(), encode_branch(branch))
    }

    /// Collection used to create refs
    pub fn refs_path(&self) -> String {
        format!("{}/git/refs", self.base())
    }

    /// Update/delete a branch ref
    pub fn branch_ref_path(&self, branch: &str) -> String {
        format!("{}/git/refs/heads/{}", self.base(), encode_branch(branch))
    }

    /// Open PRs from `owner:head` into `base`
    pub fn open_pulls_path(&self, base: &str, head: &str) -> String {
        format!(
            "{}/pulls?state=open&base={}&head={}",
            self.base(),
            urlencoding::encode(base),
            urlencoding::encode(&format!("{}:{head}", self.owner)),
        )
    }

    pub fn pulls_path(&self) -> String {
        format!("{}/pulls", self.base())
    }

    pub fn pull_path(&self, number: u64) -> String {
        format!("{}/pulls/{number}", self.base())
    }

    pub fn comments_path(&self, number: u64) -> String {
        format!("{}/issues/{number}/comments", self.base())
    }

    pub fn labels_path(&self, number: u64) -> String {
        format!("{}/issues/{number}/labels", self.base())
    }
}

/// Percent-encode each `/`-separated segment of a branch name
///
/// Git allows `#`, `?` and `%` in branch names; left raw they would end the
/// URL path early.
fn encode_branch(branch: &str) -> String {
    branch
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Body for `POST git/refs`
pub(crate) fn create_ref_body(branch: &str, sha: &str) -> serde_json::Value {
    json!({ "ref": format!("refs/heads/{branch}"), "sha": sha })
}

/// Body for updating a ref; `force: false` only allows fast-forwards
pub(crate) fn update_ref_body(sha: &str, force: bool) -> serde_json::Value {
    json!({ "sha": sha, "force": force })
}
