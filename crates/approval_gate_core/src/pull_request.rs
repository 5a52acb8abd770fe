//! Pull request identity types
//!
//! The trigger context a check runs against: which repository and which pull
//! request.

use serde::{Deserialize, Serialize};

use crate::errors::{ApprovalGateResult, Error};

#[cfg(test)]
#[path = "pull_request_tests.rs"]
mod tests;

/// Identifies the pull request under check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestContext {
    /// Repository owner (user or organization login)
    pub owner: String,
    /// Repository name, without the owner
    pub repo: String,
    /// Pull request number
    pub number: u64,
}

impl PullRequestContext {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }

    /// Builds a context from an `owner/repo` slug such as the runner's
    /// `GITHUB_REPOSITORY` value.
    ///
    /// # Errors
    /// Returns `Error::InvalidRepository` unless the slug has exactly one `/`
    /// separating two non-empty parts.
    pub fn from_slug(slug: &str, number: u64) -> ApprovalGateResult<Self> {
        let (owner, repo) = parse_repository_slug(slug)?;
        Ok(Self::new(owner, repo, number))
    }
}

impl std::fmt::Display for PullRequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Splits an `owner/repo` slug into its two parts.
pub fn parse_repository_slug(slug: &str) -> ApprovalGateResult<(String, String)> {
    let slug = slug.trim();
    match slug.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::InvalidRepository(slug.to_string())),
    }
}
