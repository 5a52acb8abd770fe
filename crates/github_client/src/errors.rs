//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when reading pull request
//! and repository data through the github_client crate.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// Each variant describes one way a read against the GitHub REST API can fail.
/// Callers that need to distinguish a missing file from a broken connection
/// should match on [`Error::NotFound`].
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{Error, RepositoryClient};
///
/// match client.get_file_content("owner", "repo", ".github/approvers.yml", None).await {
///     Ok(text) => println!("{} bytes", text.len()),
///     Err(Error::NotFound) => eprintln!("No configuration file"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A request could not be sent or the client could not be built.
    ///
    /// The contained string is the underlying transport or builder error.
    #[error("API request failed: {0}")]
    ApiError(String),

    /// The GitHub client could not be initialized with the provided credentials.
    ///
    /// The contained string provides specific details about the failure.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// A successful GitHub response body did not have the expected shape.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A file was found but its content could not be turned into text.
    ///
    /// This occurs when the contents API reports an unsupported encoding, or
    /// the decoded bytes are not valid base64 or UTF-8.
    #[error("Invalid file content: {0}")]
    InvalidContent(String),

    /// GitHub answered with an error status other than not-found or rate limiting.
    ///
    /// `message` is the detail GitHub sent in the response body, for example
    /// `Bad credentials` for a revoked token.
    #[error("GitHub request failed with status {status}: {message}")]
    RequestFailed {
        status: http::StatusCode,
        message: String,
    },

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code,
    /// indicating that the requested resource (pull request, file, etc.)
    /// does not exist or is not accessible with the current token.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
