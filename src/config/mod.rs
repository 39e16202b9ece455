//! Flow files: the list of branch pairs a pipeline keeps in sync
//!
//! ```toml
//! [defaults]
//! owner = "octo"
//! repo = "widgets"
//! update_existing = true
//!
//! [[merge]]
//! src = "main"
//! dest = "release/2.0"
//! auto_merge = true
//! ```

mod storage;

pub use storage::{load_flows, parse_flows};

use crate::error::{Error, Result};
use crate::types::MergeRequest;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Values shared by every flow unless the flow overrides them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowDefaults {
    /// Repository owner
    pub owner: Option<String>,
    /// Repository name
    pub repo: Option<String>,
    /// Refresh an already open merge PR
    pub update_existing: Option<bool>,
    /// Label new PRs with `auto-merge`
    pub auto_merge: Option<bool>,
}

/// One `[[merge]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowEntry {
    /// Source branch
    pub src: String,
    /// Destination branch
    pub dest: String,
    /// Overrides `defaults.owner`
    pub owner: Option<String>,
    /// Overrides `defaults.repo`
    pub repo: Option<String>,
    /// Overrides `defaults.update_existing`
    pub update_existing: Option<bool>,
    /// Overrides `defaults.auto_merge`
    pub auto_merge: Option<bool>,
}

/// Parsed flow file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowFile {
    /// Shared values
    #[serde(default)]
    pub defaults: FlowDefaults,
    /// Branch pairs, run in order
    #[serde(default)]
    pub merge: Vec<FlowEntry>,
}

impl FlowFile {
    /// Resolve defaults and validate every flow
    ///
    /// `update_existing` defaults to `true` and `auto_merge` to `false`.
    pub fn into_requests(self, is_auto_triggered: bool) -> Result<Vec<MergeRequest>> {
        let mut seen = HashSet::new();
        let mut requests = Vec::with_capacity(self.merge.len());

        for (index, entry) in self.merge.into_iter().enumerate() {
            let position = index + 1;
            let owner = entry
                .owner
                .or_else(|| self.defaults.owner.clone())
                .ok_or_else(|| Error::Config(format!("merge #{position}: no owner")))?;
            let repo = entry
                .repo
                .or_else(|| self.defaults.repo.clone())
                .ok_or_else(|| Error::Config(format!("merge #{position}: no repo")))?;

            if entry.src.trim().is_empty() || entry.dest.trim().is_empty() {
                return Err(Error::Config(format!(
                    "merge #{position}: src and dest must not be empty"
                )));
            }
            if entry.src == entry.dest {
                return Err(Error::Config(format!(
                    "merge #{position}: src and dest are both '{}'",
                    entry.src
                )));
            }

            let key = (owner.clone(), repo.clone(), entry.src.clone(), entry.dest.clone());
            if !seen.insert(key) {
                return Err(Error::Config(format!(
                    "merge #{position}: duplicate flow {owner}/{repo} {} -> {}",
                    entry.src, entry.dest
                )));
            }

            requests.push(MergeRequest {
                repo_owner: owner,
                repo_name: repo,
                src_branch: entry.src,
                dest_branch: entry.dest,
                update_existing_pr: entry
                    .update_existing
                    .or(self.defaults.update_existing)
                    .unwrap_or(true),
                add_auto_merge_label: entry
                    .auto_merge
                    .or(self.defaults.auto_merge)
                    .unwrap_or(false),
                is_auto_triggered,
            });
        }

        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(src: &str, dest: &str) -> FlowEntry {
        FlowEntry {
            src: src.to_string(),
            dest: dest.to_string(),
            owner: None,
            repo: None,
            update_existing: None,
            auto_merge: None,
        }
    }

    fn with_defaults(merge: Vec<FlowEntry>) -> FlowFile {
        FlowFile {
            defaults: FlowDefaults {
                owner: Some("octo".to_string()),
                repo: Some("widgets".to_string()),
                ..FlowDefaults::default()
            },
            merge,
        }
    }

    #[test]
    fn test_defaults_fill_in() {
        let requests = with_defaults(vec![entry("main", "dev")])
            .into_requests(true)
            .unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].repo_owner, "octo");
        assert_eq!(requests[0].repo_name, "widgets");
        assert!(requests[0].update_existing_pr);
        assert!(!requests[0].add_auto_merge_label);
        assert!(requests[0].is_auto_triggered);
    }

    #[test]
    fn test_entry_overrides_defaults() {
        let mut flow = entry("main", "dev");
        flow.repo = Some("gadgets".to_string());
        flow.auto_merge = Some(true);
        flow.update_existing = Some(false);

        let requests = with_defaults(vec![flow]).into_requests(false).unwrap();
        assert_eq!(requests[0].repo_name, "gadgets");
        assert!(requests[0].add_auto_merge_label);
        assert!(!requests[0].update_existing_pr);
        assert!(!requests[0].is_auto_triggered);
    }

    #[test]
    fn test_missing_owner_is_an_error() {
        let file = FlowFile {
            defaults: FlowDefaults::default(),
            merge: vec![entry("main", "dev")],
        };
        let err = file.into_requests(true).unwrap_err();
        assert!(err.to_string().contains("merge #1: no owner"));
    }

    #[test]
    fn test_same_src_and_dest_rejected() {
        let err = with_defaults(vec![entry("main", "main")])
            .into_requests(true)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_duplicate_flow_rejected() {
        let err = with_defaults(vec![entry("main", "dev"), entry("main", "dev")])
            .into_requests(true)
            .unwrap_err();
        assert!(err.to_string().contains("merge #2: duplicate flow"));
    }

    #[test]
    fn test_reverse_direction_is_not_a_duplicate() {
        let requests = with_defaults(vec![entry("main", "dev"), entry("dev", "main")])
            .into_requests(true)
            .unwrap();
        assert_eq!(requests.len(), 2);
    }
}
