//! In-memory `RepositoryClient` for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use github_client::{Error as GitHubError, RepositoryClient};

type ErrorFactory = fn() -> GitHubError;

/// A `RepositoryClient` that serves canned data and records every call.
#[derive(Default)]
pub struct MockRepositoryClient {
    files: HashMap<String, String>,
    labels: Vec<String>,
    approvers: Vec<String>,
    file_error: Option<ErrorFactory>,
    labels_error: Option<ErrorFactory>,
    approvers_error: Option<ErrorFactory>,
    calls: Mutex<Vec<String>>,
}

impl MockRepositoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_approvers(mut self, approvers: &[&str]) -> Self {
        self.approvers = approvers.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn failing_file(mut self, error: ErrorFactory) -> Self {
        self.file_error = Some(error);
        self
    }

    pub fn failing_labels(mut self, error: ErrorFactory) -> Self {
        self.labels_error = Some(error);
        self
    }

    pub fn failing_approvers(mut self, error: ErrorFactory) -> Self {
        self.approvers_error = Some(error);
        self
    }

    /// Names of the operations called so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RepositoryClient for MockRepositoryClient {
    async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<String, GitHubError> {
        self.record(format!(
            "get_file_content {}/{}/{}@{}",
            owner,
            repo,
            path,
            git_ref.unwrap_or("default")
        ));
        if let Some(error) = self.file_error {
            return Err(error());
        }
        self.files.get(path).cloned().ok_or(GitHubError::NotFound)
    }

    async fn list_pull_request_labels(
        &self,
        owner: &str,
        repo: &str,
        pull_request: u64,
    ) -> Result<Vec<String>, GitHubError> {
        self.record(format!("list_pull_request_labels {}/{}#{}", owner, repo, pull_request));
        if let Some(error) = self.labels_error {
            return Err(error());
        }
        Ok(self.labels.clone())
    }

    async fn list_pull_request_approvers(
        &self,
        owner: &str,
        repo: &str,
        pull_request: u64,
    ) -> Result<Vec<String>, GitHubError> {
        self.record(format!(
            "list_pull_request_approvers {}/{}#{}",
            owner, repo, pull_request
        ));
        if let Some(error) = self.approvers_error {
            return Err(error());
        }
        Ok(self.approvers.clone())
    }
}
