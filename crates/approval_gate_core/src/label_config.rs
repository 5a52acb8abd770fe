//! Label configuration loading.
//!
//! The label configuration maps a repository label to the reviewers who may
//! approve pull requests carrying it:
//!
//! ```yaml
//! needs-security-review:
//!   - alice
//!   - bob
//! needs-docs-review:
//!   - carol
//! ```

use std::collections::BTreeMap;

use github_client::RepositoryClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{ApprovalGateResult, Error, PullRequestContext};

#[cfg(test)]
#[path = "label_config_tests.rs"]
mod tests;

/// Mapping from label name to the reviewers whose approval satisfies it.
///
/// Immutable once loaded. A label may map to an empty reviewer list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelConfig {
    labels: BTreeMap<String, Vec<String>>,
}

impl LabelConfig {
    pub fn new(labels: BTreeMap<String, Vec<String>>) -> Self {
        Self { labels }
    }

    /// Returns the reviewers configured for `label`, if the label is configured.
    pub fn reviewers_for(&self, label: &str) -> Option<&[String]> {
        self.labels.get(label).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Iterates over `(label, reviewers)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.labels
            .iter()
            .map(|(label, reviewers)| (label.as_str(), reviewers.as_slice()))
    }
}

impl<L, R> FromIterator<(L, Vec<R>)> for LabelConfig
where
    L: Into<String>,
    R: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, Vec<R>)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(label, reviewers)| {
                    (label.into(), reviewers.into_iter().map(Into::into).collect())
                })
                .collect(),
        )
    }
}

/// Parses label configuration YAML.
///
/// The document must be a mapping from label name to a list of reviewer
/// logins. A label with a null value is read as having no reviewers.
///
/// # Errors
/// Returns `Error::InvalidLabelConfig` if the text is empty or does not have
/// that shape.
pub fn parse_label_config(text: &str) -> ApprovalGateResult<LabelConfig> {
    if text.trim().is_empty() {
        return Err(Error::InvalidLabelConfig(
            "configuration is empty".to_string(),
        ));
    }

    let raw: Option<BTreeMap<String, Option<Vec<String>>>> =
        serde_yaml::from_str(text).map_err(|e| Error::InvalidLabelConfig(e.to_string()))?;

    let raw = raw.ok_or_else(|| {
        Error::InvalidLabelConfig("configuration is empty".to_string())
    })?;

    Ok(LabelConfig::new(
        raw.into_iter()
            .map(|(label, reviewers)| (label, reviewers.unwrap_or_default()))
            .collect(),
    ))
}

/// Loads the label configuration from the pull request's repository.
///
/// Returns `Ok(None)` when the file does not exist, cannot be decoded as text,
/// or fails to parse. Callers treat `None` as a terminal failure.
///
/// # Errors
/// Any other GitHub failure is returned as `Error::GitHub`.
pub async fn load_label_config(
    client: &dyn RepositoryClient,
    context: &PullRequestContext,
    path: &str,
    git_ref: Option<&str>,
) -> ApprovalGateResult<Option<LabelConfig>> {
    debug!(path = path, git_ref = ?git_ref, "Loading label configuration");

    let text = match client
        .get_file_content(&context.owner, &context.repo, path, git_ref)
        .await
    {
        Ok(text) => text,
        Err(github_client::Error::NotFound) => {
            warn!(path = path, "Label configuration file not found");
            return Ok(None);
        }
        Err(github_client::Error::InvalidContent(reason)) => {
            warn!(path = path, reason = reason, "Label configuration file is not readable text");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    match parse_label_config(&text) {
        Ok(config) => {
            info!(path = path, label_count = config.len(), "Loaded label configuration");
            Ok(Some(config))
        }
        Err(e) => {
            warn!(path = path, error = %e, "Failed to parse label configuration");
            Ok(None)
        }
    }
}
