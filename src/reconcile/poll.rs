//! Mergeability polling
//!
//! GitHub computes `mergeable` in the background after a PR is opened or its
//! head moves, and answers `null` until it is done. We poll a bounded number
//! of times and fall back to [`Mergeability::Unknown`].

use crate::labels::is_conflict_label;
use crate::platform::Transport;
use crate::reconcile::api::PullDetail;
use crate::reconcile::{Step, require_success};
use crate::types::Mergeability;
use std::time::Duration;
use tracing::{debug, warn};

/// Default number of PR fetches before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default wait before each fetch
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Polling budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Number of PR fetches before giving up
    pub max_attempts: u32,
    /// Wait before each fetch
    pub delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

impl PollConfig {
    /// Poll without waiting between attempts
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay: Duration::ZERO,
        }
    }
}

/// Fetch `pull_path` until GitHub reports a non-null `mergeable`
///
/// A `true` verdict is downgraded to [`Mergeability::Conflicted`] when the
/// PR already carries the conflict label. A non-2xx fetch halts the caller's
/// path.
pub(crate) async fn poll_mergeability(
    transport: &dyn Transport,
    pull_path: &str,
    config: PollConfig,
) -> Step<Mergeability> {
    for attempt in 1..=config.max_attempts {
        tokio::time::sleep(config.delay).await;

        let response = require_success(transport.get(pull_path).await?)?;
        let detail: PullDetail = response.json()?;
        debug!(attempt, mergeable = ?detail.mergeable, "polled mergeability");

        if let Some(mergeable) = detail.mergeable {
            let labelled = detail.labels.iter().any(|l| is_conflict_label(&l.name));
            return Ok(if mergeable && !labelled {
                Mergeability::Clean
            } else {
                Mergeability::Conflicted
            });
        }
    }

    warn!(
        attempts = config.max_attempts,
        "Timed out waiting for PR mergeability status to become available"
    );
    Ok(Mergeability::Unknown)
}
