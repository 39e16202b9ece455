//! merge-pr: keep a downstream branch in sync through merge pull requests
//!
//! Given a source and destination branch, the [`reconcile::Reconciler`]
//! makes sure a `merges/<src>-to-<dest>` branch and a matching pull request
//! exist, refreshes them when the source moves, and labels the PR when
//! GitHub reports merge conflicts.
//!
//! All network access goes through the [`platform::Transport`] trait, which
//! has a live GitHub implementation and a dry-run wrapper for rehearsals.

pub mod auth;
pub mod config;
pub mod error;
pub mod labels;
pub mod platform;
pub mod reconcile;
pub mod types;
