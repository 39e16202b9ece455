//! Reading flow files from disk.

use super::FlowFile;
use crate::error::{Error, Result};
use crate::types::MergeRequest;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse flow file contents.
pub fn parse_flows(content: &str, is_auto_triggered: bool) -> Result<Vec<MergeRequest>> {
    let file: FlowFile =
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse: {e}")))?;
    file.into_requests(is_auto_triggered)
}

/// Load and validate the flow file at `path`.
///
/// A file without any `[[merge]]` entries is an error.
pub fn load_flows(path: &Path, is_auto_triggered: bool) -> Result<Vec<MergeRequest>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let requests = parse_flows(&content, is_auto_triggered).map_err(|e| match e {
        Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
        other => other,
    })?;

    if requests.is_empty() {
        return Err(Error::Config(format!(
            "{}: no [[merge]] entries",
            path.display()
        )));
    }

    debug!(path = %path.display(), count = requests.len(), "loaded flows");
    Ok(requests)
}
