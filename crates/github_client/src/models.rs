//! # Models
//!
//! This module contains the wire models the client reads from the GitHub REST API.
//!
//! Only the fields needed to gate a pull request on reviewer approval are kept:
//! label names, review authors and states, and file contents.

use std::collections::HashMap;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a label on a pull request.
///
/// # Examples
///
/// ```
/// use github_client::models::Label;
///
/// let label = Label {
///     name: "needs-security-review".to_string(),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,
}

/// Represents a GitHub user account.
///
/// # Examples
///
/// ```rust
/// use github_client::models::User;
///
/// let user = User {
///     id: 12345,
///     login: "octocat".to_string(),
/// };
///
/// println!("User: {} (ID: {})", user.login, user.id);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct User {
    /// The unique numeric ID of the user
    pub id: u64,
    /// The login name of the user
    pub login: String,
}

/// The state of a submitted pull request review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,

    /// Any state GitHub adds after this client was written.
    #[serde(other)]
    Unknown,
}

/// A single review on a pull request.
///
/// GitHub returns reviews in submission order, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// The unique ID of the review
    pub id: u64,

    /// The reviewer. `None` when the account has since been deleted.
    pub user: Option<User>,

    /// The current state of this review
    pub state: ReviewState,

    /// When the review was submitted. Pending reviews have no timestamp.
    #[serde(default)]
    pub submitted_at: Option<String>,
}

/// The response of the repository contents API for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContent {
    /// Entry type, `file` for regular files
    #[serde(rename = "type")]
    pub entry_type: String,

    /// Encoding of `content`, normally `base64`
    #[serde(default)]
    pub encoding: Option<String>,

    /// Encoded file body. GitHub wraps base64 output at 60 characters.
    #[serde(default)]
    pub content: Option<String>,

    /// Full path within the repository
    pub path: String,

    /// Git SHA of the blob
    pub sha: String,
}

impl FileContent {
    /// Decodes the file body into UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidContent` if the entry is not a file, the encoding is
    /// not base64, or the decoded bytes are not valid UTF-8.
    pub fn decoded_text(&self) -> Result<String, Error> {
        if self.entry_type != "file" {
            return Err(Error::InvalidContent(format!(
                "{} is a {}, not a file",
                self.path, self.entry_type
            )));
        }

        match self.encoding.as_deref() {
            Some("base64") => {}
            other => {
                return Err(Error::InvalidContent(format!(
                    "unsupported encoding: {}",
                    other.unwrap_or("none")
                )))
            }
        }

        let encoded: String = self
            .content
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| Error::InvalidContent(format!("{}: {}", self.path, e)))?;

        String::from_utf8(bytes).map_err(|e| Error::InvalidContent(format!("{}: {}", self.path, e)))
    }
}

/// Reduces a review history to the logins whose current review state is approved.
///
/// Reviews are replayed in the order given. An `APPROVED` review marks the author
/// as approving; a `CHANGES_REQUESTED` or `DISMISSED` review clears that. Comments,
/// pending reviews and unknown states leave the author's state untouched. Reviews
/// without an author are skipped.
///
/// Each login appears at most once, in the order of its first state-bearing review.
pub fn approvers_from_reviews(reviews: &[Review]) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut approved: HashMap<&str, bool> = HashMap::new();

    for review in reviews {
        let Some(user) = &review.user else {
            continue;
        };

        let state = match review.state {
            ReviewState::Approved => true,
            ReviewState::ChangesRequested | ReviewState::Dismissed => false,
            ReviewState::Commented | ReviewState::Pending | ReviewState::Unknown => continue,
        };

        if approved.insert(user.login.as_str(), state).is_none() {
            order.push(user.login.as_str());
        }
    }

    order
        .into_iter()
        .filter(|login| approved.get(login).copied().unwrap_or(false))
        .map(str::to_string)
        .collect()
}
