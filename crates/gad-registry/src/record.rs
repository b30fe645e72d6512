use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for `reviewed_by` while a submission is still Pending.
pub const UNREVIEWED: &str = "-";

/// Review state of a submission.
///
/// Pending is the only non-terminal state; Approved and Denied accept no
/// further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Denied,
}

impl SubmissionStatus {
    /// Whether a review transition out of this state is allowed.
    #[inline]
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
            Self::Denied => write!(f, "Denied"),
        }
    }
}

/// One uploaded dataset, as listed by every view.
///
/// Field names are persisted in camelCase to match the databank's stored
/// document layout. `submitted_by` and `office` are snapshots taken at
/// submission time, not live references; renaming a user later does not
/// rewrite history.
///
/// # Invariants
/// - `id` is unique across the registry and is the sole key into the
///   binary object store
/// - `is_stored_locally == true` implies a blob exists under `id` (the
///   converse is not guaranteed; orphaned blobs are tolerated)
/// - `reviewer_remarks` is present exactly when `status` is Denied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: String,
    pub form_name: String,
    pub submitted_by: String,
    pub office: String,
    pub status: SubmissionStatus,
    pub reviewed_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_remarks: Option<String>,
    pub date: String,
    pub created: String,
    pub file_size: String,
    pub is_stored_locally: bool,
}
