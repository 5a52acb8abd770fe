use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result type for approval gate operations.
pub type ApprovalGateResult<T> = Result<T, Error>;

/// Errors that end an approval check run.
///
/// Every variant is terminal: the run reports the error's message as its
/// failure and stops.
#[derive(Error, Debug)]
pub enum Error {
    /// The label configuration file was missing, empty or malformed.
    #[error("Error reading the config yaml file")]
    LabelConfigUnavailable,

    /// One or more labels on the pull request lack an approval from their
    /// required reviewers. Holds the unmet label names in check order.
    #[error("Missing approvals from labels: {}", .0.join(","))]
    MissingApprovals(Vec<String>),

    /// The label configuration text could not be parsed.
    #[error("Invalid label configuration: {0}")]
    InvalidLabelConfig(String),

    /// A repository slug was not of the form `owner/repo`.
    #[error("Invalid repository '{0}', expected 'owner/repo'")]
    InvalidRepository(String),

    /// A call to GitHub failed.
    #[error(transparent)]
    GitHub(#[from] github_client::Error),
}
