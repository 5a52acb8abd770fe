use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the approval gate CLI.
#[derive(Error, Debug)]
pub enum Error {
    /// A required input was not provided or was blank.
    ///
    /// GitHub Actions sets unset inputs to an empty string, so blank values
    /// are treated the same as missing ones.
    #[error("Input required and not supplied: {0}")]
    MissingInput(String),

    /// The GitHub client could not be created or a GitHub call failed.
    #[error(transparent)]
    GitHub(#[from] github_client::Error),

    /// The approval check failed.
    #[error(transparent)]
    Check(#[from] approval_gate_core::Error),
}
