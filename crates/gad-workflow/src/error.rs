use crate::identity::Role;
use gad_notify::NotifyError;
use gad_registry::{RegistryError, SubmissionStatus};
use gad_store::StoreError;

/// Illegal state transitions and unmet preconditions.
///
/// Recovered locally: the caller blocks the action and shows an inline
/// message. No state is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Submit called with zero staged files
    #[error("no files staged for submission")]
    EmptyBatch,

    /// The acting role is not entitled to this operation
    #[error("role {role} is not permitted to {action}")]
    RoleNotPermitted { role: Role, action: &'static str },

    /// Approve/deny on an id that no longer exists
    #[error("submission {id} not found")]
    NotFound { id: String },

    /// Approve/deny on a record that already left Pending
    #[error("submission {id} is {status}, not Pending")]
    NotPending {
        id: String,
        status: SubmissionStatus,
    },

    /// Deny requires non-blank remarks; this is a hard precondition
    #[error("denial requires reviewer remarks")]
    RemarksRequired,

    /// A user may delete only their own submissions
    #[error("only the submitter may delete submission {id}")]
    NotOwner { id: String },
}

/// Top-level workflow failure.
///
/// Validation failures are recoverable at the point of action; everything
/// else is a storage failure that aborts the whole operation. Partial
/// effects written before the failure are not rolled back (documented
/// limitation of the single-attempt model).
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Precondition failed; nothing was mutated
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Binary object store failure
    #[error("binary store failure: {0}")]
    Store(#[from] StoreError),

    /// Metadata registry failure
    #[error("registry failure: {0}")]
    Registry(#[from] RegistryError),

    /// Notification log failure
    #[error("notification failure: {0}")]
    Notify(#[from] NotifyError),
}

impl WorkflowError {
    /// Whether this failure is an inline-recoverable validation error, as
    /// opposed to a "try again" storage failure.
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
