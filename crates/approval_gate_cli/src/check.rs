//! The `label-approval-gate` run: build the trigger context, run the check and
//! report the outcome to the runner.

use std::io::{self, Write};

use approval_gate_core::{run_approval_check, ApprovalCheck, CheckOutcome};
use github_client::{create_token_client, GitHubClient};
use secrecy::ExposeSecret;
use tracing::{error, info};

use crate::{action_context, config::ActionInputs, errors::Error, workflow_commands};

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;

/// Message reported when the run was not triggered by a pull request.
pub const NOT_APPLICABLE_NOTICE: &str =
    "Could not get a pull request number from context, exiting...";

/// Runs the approval check described by `inputs`.
///
/// No GitHub client is created when there is no pull request to check.
pub async fn run(inputs: &ActionInputs) -> Result<CheckOutcome, Error> {
    let pull_request =
        action_context::pull_request_context(&inputs.repository, inputs.event_path.as_deref())?;
    if pull_request.is_none() {
        return Ok(CheckOutcome::NotApplicable);
    }

    let octocrab = create_token_client(
        inputs.repo_token.expose_secret(),
        inputs.api_url.as_deref(),
    )?;
    let client = GitHubClient::new(octocrab);

    let check = ApprovalCheck {
        pull_request,
        configuration_path: inputs.configuration_path.clone(),
        config_ref: inputs.git_ref.clone(),
    };

    Ok(run_approval_check(&client, &check).await?)
}

/// Writes the workflow command for a run result and returns the process exit code.
pub fn report(result: &Result<CheckOutcome, Error>, out: &mut impl Write) -> io::Result<i32> {
    match result {
        Ok(CheckOutcome::NotApplicable) => {
            writeln!(out, "{}", workflow_commands::notice(NOT_APPLICABLE_NOTICE))?;
            Ok(0)
        }
        Ok(CheckOutcome::Approved { required }) => {
            info!(
                labels = ?required.labels().collect::<Vec<_>>(),
                "Approval check passed"
            );
            Ok(0)
        }
        Err(e) => {
            error!(error = %e, "Approval check failed");
            writeln!(out, "{}", workflow_commands::error(&e.to_string()))?;
            Ok(1)
        }
    }
}
