//! Trigger context of the workflow run.
//!
//! The runner writes the triggering webhook payload to the file named by
//! `GITHUB_EVENT_PATH`. Pull request events (`pull_request`,
//! `pull_request_review`, `pull_request_target`) carry the pull request under
//! a top-level `pull_request` key.

use std::{fs, path::Path};

use approval_gate_core::PullRequestContext;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::Error;

#[cfg(test)]
#[path = "action_context_tests.rs"]
mod tests;

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
}

/// Reads the pull request number from an event payload file.
///
/// Returns `None` when there is no payload file, it cannot be read or parsed,
/// or the event is not about a pull request.
pub fn pull_request_number(event_path: Option<&Path>) -> Option<u64> {
    let Some(path) = event_path else {
        debug!("No event payload path provided");
        return None;
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = ?path, error = %e, "Failed to read event payload");
            return None;
        }
    };

    match serde_json::from_str::<EventPayload>(&content) {
        Ok(payload) => payload.pull_request.map(|pr| pr.number),
        Err(e) => {
            warn!(path = ?path, error = %e, "Failed to parse event payload");
            None
        }
    }
}

/// Builds the pull request context for the run.
///
/// Returns `Ok(None)` when the run was not triggered by a pull request; the
/// repository slug is only validated when there is a pull request to check.
///
/// # Errors
/// Returns `Error::Check` wrapping `InvalidRepository` if `repository` is not
/// an `owner/repo` slug.
pub fn pull_request_context(
    repository: &str,
    event_path: Option<&Path>,
) -> Result<Option<PullRequestContext>, Error> {
    let Some(number) = pull_request_number(event_path) else {
        return Ok(None);
    };

    let context = PullRequestContext::from_slug(repository, number)?;
    debug!(pull_request = %context, "Resolved pull request context");
    Ok(Some(context))
}
