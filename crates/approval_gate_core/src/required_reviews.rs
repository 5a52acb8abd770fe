//! Resolution of the reviews a pull request needs from its labels.

use serde::Serialize;

use crate::LabelConfig;

#[cfg(test)]
#[path = "required_reviews_tests.rs"]
mod tests;

/// A label on the pull request together with the reviewers who may satisfy it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredReview {
    pub label: String,
    pub approvers: Vec<String>,
}

/// The configured labels present on a pull request, in the order the labels
/// appear on the pull request. Each label occurs once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequiredReviews {
    entries: Vec<RequiredReview>,
}

impl RequiredReviews {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RequiredReview> {
        self.entries.iter()
    }

    /// Returns the required approvers for `label`, if it needs review.
    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.approvers.as_slice())
    }

    /// Label names that need review, in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }
}

impl<'a> IntoIterator for &'a RequiredReviews {
    type Item = &'a RequiredReview;
    type IntoIter = std::slice::Iter<'a, RequiredReview>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Restricts the label configuration to the labels present on the pull request.
///
/// Pull request labels without a configuration entry need no review and are
/// skipped. Configured labels that are not on the pull request are excluded.
pub fn resolve_required_reviews<S: AsRef<str>>(
    config: &LabelConfig,
    pr_labels: &[S],
) -> RequiredReviews {
    let mut entries: Vec<RequiredReview> = Vec::new();

    for label in pr_labels.iter().map(AsRef::as_ref) {
        if entries.iter().any(|entry| entry.label == label) {
            continue;
        }
        if let Some(approvers) = config.reviewers_for(label) {
            entries.push(RequiredReview {
                label: label.to_string(),
                approvers: approvers.to_vec(),
            });
        }
    }

    RequiredReviews { entries }
}
