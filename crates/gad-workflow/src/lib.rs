//! GAD Databank submission workflow engine
//!
//! Orchestrates the create → review → resolve pipeline:
//! - Stages uploaded files in a transient, caller-owned buffer
//! - On commit, persists each file's bytes to the binary object store and a
//!   [`SubmissionRecord`] to the metadata registry, in that order
//! - Drives the Pending → Approved | Denied state machine with role-gated,
//!   centrally-enforced preconditions
//! - Fans resolution and new-submission notifications out through the bus
//! - Projects role- and office-filtered views for the history list, the
//!   approval queue, the retrieval catalog and the viewer
//!
//! # Example
//!
//! ```rust,ignore
//! use gad_workflow::{Identity, Role, StagedFile, WorkflowEngine};
//!
//! # async fn example(engine: WorkflowEngine) -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Identity::new(Role::Provider, "CPDSO", "A.", "Reyes");
//! let batch = vec![StagedFile::new("budget_2025.xlsx", "application/vnd.ms-excel", bytes)];
//!
//! let records = engine.submit(batch, &provider).await?;
//! println!("committed {} submissions", records.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod engine;
mod error;
mod identity;
pub mod projection;
mod staging;

pub use engine::{
    human_file_size, WorkflowEngine, APPROVED_TITLE, DENIED_TITLE, NEW_SUBMISSION_TITLE,
    REGISTRATION_TITLE,
};
pub use error::{ValidationError, WorkflowError};
pub use identity::{Identity, Role};
pub use staging::{StagedFile, StagingArea};

// Contract types from the stores, re-exported for consumers of the engine.
pub use gad_notify::{BusEvent, Notification, NotificationBus, NotificationDraft};
pub use gad_registry::{Registry, SubmissionRecord, SubmissionStatus, UNREVIEWED};
pub use gad_store::{BlobStore, StoreConfig, StoredBlob};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the submission workflow
    pub use crate::{
        Identity, Role, StagedFile, StagingArea, SubmissionRecord, SubmissionStatus,
        ValidationError, WorkflowEngine, WorkflowError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
