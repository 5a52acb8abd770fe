//! # Approval Gate Core
//!
//! This crate decides whether a pull request has the reviewer approvals its
//! labels demand.
//!
//! ## Overview
//!
//! A repository keeps a YAML file mapping labels to the reviewers allowed to
//! approve pull requests carrying them. A check run:
//! 1. Loads that file from the repository ([`load_label_config`])
//! 2. Fetches the labels on the pull request
//! 3. Keeps the configured labels present on it ([`resolve_required_reviews`])
//! 4. Fetches the logins that currently approve the pull request
//! 5. Reports every label none of whose reviewers approved ([`find_missing_approvals`])
//!
//! [`run_approval_check`] drives the whole sequence against any
//! [`RepositoryClient`].
//!
//! ## Examples
//!
//! ```no_run
//! use approval_gate_core::{run_approval_check, ApprovalCheck, PullRequestContext};
//! use github_client::{create_token_client, GitHubClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new(create_token_client("ghp_example", None)?);
//! let check = ApprovalCheck {
//!     pull_request: Some(PullRequestContext::new("octo-org", "octo-repo", 42)),
//!     configuration_path: ".github/approvers.yml".to_string(),
//!     config_ref: None,
//! };
//!
//! match run_approval_check(&client, &check).await {
//!     Ok(outcome) => println!("Passed: {:?}", outcome),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! A failed check is an `Err`: [`Error::LabelConfigUnavailable`] when the
//! configuration cannot be read, [`Error::MissingApprovals`] when approvals are
//! missing, and [`Error::GitHub`] when an API call fails. The error's
//! `Display` text is the message reported to the user.

use github_client::RepositoryClient;
use tracing::{info, instrument};

mod errors;
pub use errors::{ApprovalGateResult, Error};

pub mod decision;
pub mod label_config;
pub mod pull_request;
pub mod required_reviews;

pub use decision::find_missing_approvals;
pub use label_config::{load_label_config, parse_label_config, LabelConfig};
pub use pull_request::{parse_repository_slug, PullRequestContext};
pub use required_reviews::{resolve_required_reviews, RequiredReview, RequiredReviews};

#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Inputs for a single approval check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalCheck {
    /// The pull request under check. `None` when the run was not triggered by
    /// a pull request.
    pub pull_request: Option<PullRequestContext>,

    /// Path of the label configuration file within the repository.
    pub configuration_path: String,

    /// Git ref to read the configuration file at. `None` reads the default branch.
    pub config_ref: Option<String>,
}

/// The result of a check run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// There was no pull request to check. Nothing was fetched.
    NotApplicable,

    /// Every label needing review has an approval from one of its reviewers.
    /// Holds the reviews that were required, which may be none.
    Approved { required: RequiredReviews },
}

/// Runs the approval check for a pull request.
///
/// # Errors
///
/// - `Error::LabelConfigUnavailable` if the configuration file is missing or
///   malformed. No pull request data is fetched in that case.
/// - `Error::MissingApprovals` listing the labels still needing approval.
/// - `Error::GitHub` if any API call fails.
#[instrument(skip(client, check), fields(path = %check.configuration_path))]
pub async fn run_approval_check(
    client: &dyn RepositoryClient,
    check: &ApprovalCheck,
) -> ApprovalGateResult<CheckOutcome> {
    let Some(pull_request) = &check.pull_request else {
        info!("No pull request in trigger context, skipping approval check");
        return Ok(CheckOutcome::NotApplicable);
    };

    let config = load_label_config(
        client,
        pull_request,
        &check.configuration_path,
        check.config_ref.as_deref(),
    )
    .await?;
    info!(config = ?config, "Label configuration");
    let config = config.ok_or(Error::LabelConfigUnavailable)?;

    let pr_labels = client
        .list_pull_request_labels(&pull_request.owner, &pull_request.repo, pull_request.number)
        .await?;
    info!(pull_request = %pull_request, labels = ?pr_labels, "Pull request labels");

    let required = resolve_required_reviews(&config, &pr_labels);
    info!(required = ?required, "Required reviews");

    let approvals = client
        .list_pull_request_approvers(&pull_request.owner, &pull_request.repo, pull_request.number)
        .await?;
    info!(approvals = ?approvals, "Pull request approvals");

    let missing = find_missing_approvals(&required, &approvals);
    if !missing.is_empty() {
        return Err(Error::MissingApprovals(missing));
    }

    info!(
        pull_request = %pull_request,
        required_count = required.len(),
        "All required approvals present"
    );
    Ok(CheckOutcome::Approved { required })
}
