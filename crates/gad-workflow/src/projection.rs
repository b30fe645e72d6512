//! Read-only view projections over the registry and the notification log.
//!
//! Every projection is a full-collection scan at read time. That is the
//! documented contract of the registry (single list, no indexes) and is
//! deliberately not optimized here.

use crate::engine::{NEW_SUBMISSION_TITLE, REGISTRATION_TITLE};
use crate::error::WorkflowError;
use crate::identity::{Identity, Role};
use gad_notify::Notification;
use gad_registry::{Registry, SubmissionRecord, SubmissionStatus};
use gad_store::BlobStore;
use std::sync::Arc;

/// One record plus whether its bytes are actually present, for the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDetail {
    pub record: SubmissionRecord,
    /// Cross-checked against the blob store, not trusted from the record's
    /// `is_stored_locally` flag alone.
    pub blob_present: bool,
}

/// The history list, approval queue, retrieval catalog and viewer.
#[derive(Debug, Clone)]
pub struct SubmissionViews {
    registry: Arc<Registry>,
    blobs: Arc<BlobStore>,
}

impl SubmissionViews {
    #[must_use]
    pub fn new(registry: Arc<Registry>, blobs: Arc<BlobStore>) -> Self {
        Self { registry, blobs }
    }

    /// Submissions of the caller's own office, every status.
    ///
    /// # Errors
    /// Propagates registry failures.
    pub async fn history(
        &self,
        identity: &Identity,
    ) -> Result<Vec<SubmissionRecord>, WorkflowError> {
        Ok(self
            .registry
            .list()
            .await?
            .into_iter()
            .filter(|r| r.office == identity.office)
            .collect())
    }

    /// Every Pending submission, unfiltered by office.
    ///
    /// # Errors
    /// Propagates registry failures.
    pub async fn approval_queue(&self) -> Result<Vec<SubmissionRecord>, WorkflowError> {
        Ok(self
            .registry
            .list()
            .await?
            .into_iter()
            .filter(|r| r.status.is_pending())
            .collect())
    }

    /// Every Approved submission, the catalog other roles retrieve from.
    ///
    /// # Errors
    /// Propagates registry failures.
    pub async fn retrieval_catalog(&self) -> Result<Vec<SubmissionRecord>, WorkflowError> {
        Ok(self
            .registry
            .list()
            .await?
            .into_iter()
            .filter(|r| r.status == SubmissionStatus::Approved)
            .collect())
    }

    /// One submission plus blob presence. `None` if the id is gone.
    ///
    /// # Errors
    /// Propagates registry and store failures.
    pub async fn viewer(&self, id: &str) -> Result<Option<SubmissionDetail>, WorkflowError> {
        let Some(record) = self.registry.find(id).await? else {
            return Ok(None);
        };
        let blob_present = self.blobs.contains(id).await?;
        Ok(Some(SubmissionDetail {
            record,
            blob_present,
        }))
    }
}

/// Read-side notification filtering.
///
/// The bus stores everything; what a session sees is decided here at
/// display time. Administrators see it all; registration notices are hidden
/// from everyone else; reviewers see every new-submission notice plus their
/// own department's; providers see their department's resolution notices.
#[must_use]
pub fn notification_inbox(all: Vec<Notification>, identity: &Identity) -> Vec<Notification> {
    all.into_iter()
        .filter(|n| match identity.role {
            Role::Administrator => true,
            _ if n.title == REGISTRATION_TITLE => false,
            Role::Reviewer => n.title == NEW_SUBMISSION_TITLE || n.department == identity.office,
            Role::Provider => {
                n.department == identity.office && n.title != NEW_SUBMISSION_TITLE
            }
        })
        .collect()
}
