//! Approval decision for required reviews.

use std::collections::HashSet;

use crate::RequiredReviews;

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;

/// Returns the labels whose required approvers include none of `approvals`.
///
/// Labels are returned in the order of `required`. Logins are compared exactly,
/// case included. A label with no required approvers can never be satisfied and
/// is always returned.
pub fn find_missing_approvals<S: AsRef<str>>(
    required: &RequiredReviews,
    approvals: &[S],
) -> Vec<String> {
    let approved: HashSet<&str> = approvals.iter().map(AsRef::as_ref).collect();

    required
        .iter()
        .filter(|entry| {
            !entry
                .approvers
                .iter()
                .any(|approver| approved.contains(approver.as_str()))
        })
        .map(|entry| entry.label.clone())
        .collect()
}
