//! GAD Databank metadata registry
//!
//! The single source of truth for listing and filtering submissions. An
//! ordered collection of [`SubmissionRecord`]s persisted as one JSON list,
//! most-recently-created first.
//!
//! Every mutation is read-modify-write over the whole collection; there is
//! deliberately no patch primitive and no index. That preserves the
//! single-writer consistency model the workflow is designed around; two
//! concurrent writers from separate processes race last-write-wins, which is
//! an accepted limitation of the local deployment, not a bug to engineer
//! away here.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod record;
mod registry;

pub use error::RegistryError;
pub use record::{SubmissionRecord, SubmissionStatus, UNREVIEWED};
pub use registry::Registry;
