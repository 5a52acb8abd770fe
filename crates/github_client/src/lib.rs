//! Crate for reading pull request data from the GitHub REST API.
//!
//! This crate provides a token-authenticated client that fetches the labels and
//! reviews of a pull request and the contents of files in a repository. All
//! operations are read-only.

use async_trait::async_trait;
use octocrab::{Octocrab, Result as OctocrabResult};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod models;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Page size used for list endpoints. 100 is the maximum GitHub allows.
const PER_PAGE: u8 = 100;

/// A client for reading pull request data from the GitHub API.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an already authenticated `Octocrab` instance.
    ///
    /// Use [`create_token_client`] to build the `Octocrab` instance from a token.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Fetches every page of a list endpoint.
    ///
    /// Pages are requested until GitHub returns fewer than [`PER_PAGE`] items.
    async fn get_all_pages<T>(&self, route: &str) -> OctocrabResult<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let mut items = Vec::new();
        let mut page: u32 = 1;
        loop {
            let parameters = PageParameters {
                per_page: PER_PAGE,
                page,
            };
            let batch: Vec<T> = self.client.get(route, Some(&parameters)).await?;
            let received = batch.len();
            items.extend(batch);

            if received < PER_PAGE as usize {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    /// Lists every review submitted on a pull request, oldest first.
    ///
    /// # Errors
    /// Returns `Error::NotFound` if the pull request does not exist and
    /// `Error::RequestFailed` when GitHub rejects the request.
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, pull_request = pull_request))]
    pub async fn list_pull_request_reviews(
        &self,
        owner: &str,
        repo: &str,
        pull_request: u64,
    ) -> Result<Vec<models::Review>, Error> {
        let route = format!("/repos/{}/{}/pulls/{}/reviews", owner, repo, pull_request);
        self.get_all_pages(&route)
            .await
            .map_err(|e| map_octocrab_error("Failed to list pull request reviews", e))
    }
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, path = %path))]
    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<String, Error> {
        let route = format!(
            "/repos/{}/{}/contents/{}",
            owner,
            repo,
            encode_content_path(path)
        );
        let parameters = ContentParameters { r#ref: git_ref };

        debug!(route = route, git_ref = ?git_ref, "Fetching file content");
        let response: OctocrabResult<models::FileContent> =
            self.client.get(route, Some(&parameters)).await;

        match response {
            Ok(file) => {
                let text = file.decoded_text()?;
                info!(sha = file.sha, length = text.len(), "Retrieved file content");
                Ok(text)
            }
            Err(e) => Err(map_octocrab_error("Failed to get file content", e)),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, pull_request = pull_request))]
    async fn list_pull_request_labels(
        &self,
        owner: &str,
        repo: &str,
        pull_request: u64,
    ) -> Result<Vec<String>, Error> {
        // Pull requests share the issue label endpoints.
        let route = format!("/repos/{}/{}/issues/{}/labels", owner, repo, pull_request);
        let labels: Vec<models::Label> = self
            .get_all_pages(&route)
            .await
            .map_err(|e| map_octocrab_error("Failed to list pull request labels", e))?;

        info!(count = labels.len(), "Retrieved pull request labels");
        Ok(labels.into_iter().map(|l| l.name).collect())
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, pull_request = pull_request))]
    async fn list_pull_request_approvers(
        &self,
        owner: &str,
        repo: &str,
        pull_request: u64,
    ) -> Result<Vec<String>, Error> {
        let reviews = self
            .list_pull_request_reviews(owner, repo, pull_request)
            .await?;
        let approvers = models::approvers_from_reviews(&reviews);

        info!(
            review_count = reviews.len(),
            approver_count = approvers.len(),
            "Resolved pull request approvers"
        );
        Ok(approvers)
    }
}

/// Trait for the read-only repository operations an approval check needs.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Gets the text content of a file in a repository.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `path` - The file path within the repository.
    /// * `git_ref` - Branch, tag or commit to read from. `None` reads the default branch.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the file does not exist,
    /// `Error::InvalidContent` if it cannot be decoded as UTF-8 text, and
    /// `Error::RequestFailed` when GitHub rejects the request.
    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<String, Error>;

    /// Lists the names of the labels currently attached to a pull request,
    /// in the order GitHub returns them.
    async fn list_pull_request_labels(
        &self,
        owner: &str,
        repo: &str,
        pull_request: u64,
    ) -> Result<Vec<String>, Error>;

    /// Lists the distinct logins whose most recent review on the pull request
    /// is an approval.
    ///
    /// The reduction from review history to current approval state is done
    /// here, see [`models::approvers_from_reviews`].
    async fn list_pull_request_approvers(
        &self,
        owner: &str,
        repo: &str,
        pull_request: u64,
    ) -> Result<Vec<String>, Error>;
}

#[derive(Debug, Serialize)]
struct PageParameters {
    per_page: u8,
    page: u32,
}

#[derive(Debug, Serialize)]
struct ContentParameters<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    r#ref: Option<&'a str>,
}

/// Percent-encodes each segment of a repository file path for use in a route.
///
/// Leading slashes are dropped and the `/` separators are kept.
fn encode_content_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Creates an `Octocrab` client authenticated with a personal access or
/// installation token.
///
/// # Arguments
///
/// * `token` - The token sent as the bearer credential on every request.
/// * `api_url` - Base URL of the REST API. `None` uses `https://api.github.com`;
///   GitHub Enterprise Server installations pass their own API URL.
///
/// # Errors
///
/// Returns `Error::AuthError` if the API URL is invalid and `Error::ApiError`
/// if the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient, Error};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Error> {
///     let octocrab = create_token_client("ghp_example", None)?;
///     let client = GitHubClient::new(octocrab);
///
///     // Use `client` to perform API operations
///     Ok(())
/// }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &str, api_url: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder();
    if let Some(url) = api_url {
        builder = builder.base_uri(url).map_err(|e| {
            error!(api_url = url, error = %e, "Invalid GitHub API URL");
            Error::AuthError(format!("Invalid GitHub API URL '{}': {}", url, e))
        })?;
    }

    builder
        .personal_token(token.to_string())
        .build()
        .map_err(|e| {
            error!(error = ?e, "Failed to build Octocrab client");
            Error::ApiError(e.to_string())
        })
}

/// Translates an octocrab failure into a client error, logging the detail GitHub sent.
fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    if let octocrab::Error::GitHub { source, .. } = &e {
        if source.status_code == http::StatusCode::NOT_FOUND {
            debug!(error_message = source.message, "{}. Resource not found", message);
            return Error::NotFound;
        }

        let limited = source.status_code == http::StatusCode::TOO_MANY_REQUESTS
            || (source.status_code == http::StatusCode::FORBIDDEN
                && source.message.to_lowercase().contains("rate limit"));
        if limited {
            error!(error_message = source.message, "{}. Rate limit exceeded", message);
            return Error::RateLimitExceeded;
        }
    }

    let mapped = match &e {
        octocrab::Error::GitHub { source, .. } => Error::RequestFailed {
            status: source.status_code,
            message: source.message.clone(),
        },
        octocrab::Error::Serde { source, .. } => Error::Deserialization(
            <serde_json::Error as serde::de::Error>::custom(source.to_string()),
        ),
        octocrab::Error::Json { source, .. } => Error::Deserialization(
            <serde_json::Error as serde::de::Error>::custom(source.to_string()),
        ),
        other => Error::ApiError(other.to_string()),
    };

    log_octocrab_error(message, e);
    mapped
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let err = source;
            error!(
                error_message = err.message,
                status = %err.status_code,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            )
        }
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        octocrab::Error::InvalidUtf8 { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. The message wasn't valid UTF-8.",
            message,
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
