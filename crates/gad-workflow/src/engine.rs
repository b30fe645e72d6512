use crate::error::{ValidationError, WorkflowError};
use crate::identity::Identity;
use crate::staging::StagedFile;
use chrono::{DateTime, Utc};
use gad_notify::{NotificationBus, NotificationDraft};
use gad_registry::{Registry, SubmissionRecord, SubmissionStatus, UNREVIEWED};
use gad_store::BlobStore;
use std::sync::Arc;
use uuid::Uuid;

/// Title of the notification routed to reviewers when a file is submitted.
pub const NEW_SUBMISSION_TITLE: &str = "New Data Submission";
/// Title of the resolution notification for an approved submission.
pub const APPROVED_TITLE: &str = "Submission Approved";
/// Title of the resolution notification for a denied submission.
pub const DENIED_TITLE: &str = "Submission Denied";
/// Title of account-registration notices; visible to administrators only.
pub const REGISTRATION_TITLE: &str = "New User Registration";

/// Where a clicked notification navigates.
const APPROVAL_QUEUE_URL: &str = "/data-approval";
const HISTORY_URL: &str = "/submission-history";

/// Render a byte count as the display string stored on the record.
///
/// Computed once at upload time from the raw byte length and never
/// recomputed; the record round-trips it verbatim afterwards.
#[must_use]
pub fn human_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else if b < GB {
        format!("{:.1} MB", b / MB)
    } else {
        format!("{:.1} GB", b / GB)
    }
}

/// New submission id: UTC date plus a random suffix.
///
/// Uniqueness is practical, not proven: a collision needs two ids minted
/// the same day sharing 8 random hex chars. The registry still rejects
/// duplicates as a backstop.
fn generate_submission_id(now: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string()[..8].to_string();
    format!("{}_{}", now.format("%Y%m%d"), suffix)
}

enum Resolution {
    Approve,
    Deny { remarks: String },
}

impl Resolution {
    fn status(&self) -> SubmissionStatus {
        match self {
            Self::Approve => SubmissionStatus::Approved,
            Self::Deny { .. } => SubmissionStatus::Denied,
        }
    }
}

/// The create → review → resolve orchestrator.
///
/// Holds the three stores and sequences every multi-step procedure:
/// - `submit` writes blobs before the registry, so a failure can never
///   leave a record with no backing bytes
/// - `delete` removes the blob before the registry entry, so a crash
///   between the two leaves an orphaned blob rather than a dangling record
/// - every resolution rewrites the record and then publishes exactly one
///   notification back toward the submitting office
///
/// Role preconditions are enforced here, per operation, not at the UI.
#[derive(Debug, Clone)]
pub struct WorkflowEngine {
    blobs: Arc<BlobStore>,
    registry: Arc<Registry>,
    bus: Arc<NotificationBus>,
}

impl WorkflowEngine {
    #[must_use]
    pub fn new(blobs: Arc<BlobStore>, registry: Arc<Registry>, bus: Arc<NotificationBus>) -> Self {
        Self {
            blobs,
            registry,
            bus,
        }
    }

    /// Commit a staged batch: one blob + one Pending record per file, in
    /// upload order, then one reviewer notification per file.
    ///
    /// The operation is not reported complete until both the blob writes
    /// and the single batch registry write have resolved.
    ///
    /// # Errors
    /// - [`ValidationError::RoleNotPermitted`] unless the caller is a
    ///   Provider or Administrator
    /// - [`ValidationError::EmptyBatch`] for zero staged files
    /// - Storage failures abort the whole call; blobs already written for
    ///   earlier files in the batch are left behind as orphans (they are
    ///   unreachable without registry records and harmless)
    pub async fn submit(
        &self,
        files: Vec<StagedFile>,
        identity: &Identity,
    ) -> Result<Vec<SubmissionRecord>, WorkflowError> {
        if !identity.role.can_submit() {
            return Err(ValidationError::RoleNotPermitted {
                role: identity.role,
                action: "submit data",
            }
            .into());
        }
        if files.is_empty() {
            return Err(ValidationError::EmptyBatch.into());
        }

        let now = Utc::now();
        let submitted_by = identity.display_name();
        let mut records = Vec::with_capacity(files.len());

        for file in &files {
            let id = generate_submission_id(now);
            self.blobs
                .put(&id, &file.bytes, &file.name, &file.content_type)
                .await?;
            records.push(SubmissionRecord {
                id,
                form_name: file.name.clone(),
                submitted_by: submitted_by.clone(),
                office: identity.office.clone(),
                status: SubmissionStatus::Pending,
                reviewed_by: UNREVIEWED.to_string(),
                reviewer_remarks: None,
                date: now.format("%B %-d, %Y").to_string(),
                created: now.format("%Y-%m-%d %H:%M:%S").to_string(),
                file_size: human_file_size(file.size()),
                is_stored_locally: true,
            });
        }

        self.registry.insert_many(records.clone()).await?;

        for record in &records {
            self.bus
                .publish(NotificationDraft::new(
                    NEW_SUBMISSION_TITLE,
                    format!(
                        "{} ({}) submitted {} for review.",
                        record.submitted_by, record.office, record.form_name
                    ),
                    record.office.clone(),
                    APPROVAL_QUEUE_URL,
                ))
                .await?;
        }

        tracing::info!(
            count = records.len(),
            by = %submitted_by,
            office = %identity.office,
            "submission batch committed"
        );
        Ok(records)
    }

    /// Approve a Pending submission.
    ///
    /// # Errors
    /// [`ValidationError::RoleNotPermitted`], [`ValidationError::NotFound`]
    /// or [`ValidationError::NotPending`]; storage failures propagate.
    pub async fn approve(
        &self,
        id: &str,
        reviewer: &Identity,
    ) -> Result<SubmissionRecord, WorkflowError> {
        self.resolve(id, reviewer, Resolution::Approve).await
    }

    /// Deny a Pending submission with mandatory remarks.
    ///
    /// # Errors
    /// [`ValidationError::RemarksRequired`] for blank remarks (checked
    /// before anything else, with no state change), plus everything
    /// [`Self::approve`] can return.
    pub async fn deny(
        &self,
        id: &str,
        reviewer: &Identity,
        remarks: &str,
    ) -> Result<SubmissionRecord, WorkflowError> {
        let remarks = remarks.trim();
        if remarks.is_empty() {
            return Err(ValidationError::RemarksRequired.into());
        }
        self.resolve(
            id,
            reviewer,
            Resolution::Deny {
                remarks: remarks.to_string(),
            },
        )
        .await
    }

    async fn resolve(
        &self,
        id: &str,
        reviewer: &Identity,
        resolution: Resolution,
    ) -> Result<SubmissionRecord, WorkflowError> {
        if !reviewer.role.can_review() {
            return Err(ValidationError::RoleNotPermitted {
                role: reviewer.role,
                action: "review submissions",
            }
            .into());
        }

        let current = self
            .registry
            .find(id)
            .await?
            .ok_or_else(|| ValidationError::NotFound { id: id.to_string() })?;
        if !current.status.is_pending() {
            return Err(ValidationError::NotPending {
                id: id.to_string(),
                status: current.status,
            }
            .into());
        }

        let reviewed_by = reviewer.display_name();
        let status = resolution.status();
        let remarks = match &resolution {
            Resolution::Approve => None,
            Resolution::Deny { remarks } => Some(remarks.clone()),
        };

        let mut updated = self
            .registry
            .update_where(
                |r| r.id == id,
                |mut r| {
                    r.status = status;
                    r.reviewed_by = reviewed_by.clone();
                    r.reviewer_remarks = remarks.clone();
                    r
                },
            )
            .await?;
        let record = updated
            .pop()
            .ok_or_else(|| ValidationError::NotFound { id: id.to_string() })?;

        let (title, message) = match &resolution {
            Resolution::Approve => (
                APPROVED_TITLE,
                format!("{} was approved by {}.", record.form_name, reviewed_by),
            ),
            Resolution::Deny { remarks } => (
                DENIED_TITLE,
                format!(
                    "{} was denied by {}: {}",
                    record.form_name, reviewed_by, remarks
                ),
            ),
        };
        self.bus
            .publish(NotificationDraft::new(
                title,
                message,
                record.office.clone(),
                HISTORY_URL,
            ))
            .await?;

        tracing::info!(%id, status = %record.status, by = %reviewed_by, "submission resolved");
        Ok(record)
    }

    /// Remove a submission and its stored bytes.
    ///
    /// Permitted only for the original submitter, regardless of status.
    /// Blob first, registry second: interrupting between the two leaves an
    /// orphaned blob, never a record whose bytes are gone. Unknown ids are
    /// a no-op success (double-delete from a second view).
    ///
    /// # Errors
    /// [`ValidationError::NotOwner`] when `requestor` did not create the
    /// record; storage failures propagate.
    pub async fn delete(&self, id: &str, requestor: &Identity) -> Result<(), WorkflowError> {
        let Some(record) = self.registry.find(id).await? else {
            return Ok(());
        };
        if record.submitted_by != requestor.display_name() {
            return Err(ValidationError::NotOwner { id: id.to_string() }.into());
        }

        self.blobs.delete(id).await?;
        self.registry.remove_where(|r| r.id == id).await?;
        tracing::info!(%id, by = %requestor.display_name(), "submission deleted");
        Ok(())
    }

    /// The metadata registry this engine writes through.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The binary object store this engine writes through.
    #[inline]
    #[must_use]
    pub fn blobs(&self) -> &Arc<BlobStore> {
        &self.blobs
    }

    /// The notification bus this engine publishes to.
    #[inline]
    #[must_use]
    pub fn bus(&self) -> &Arc<NotificationBus> {
        &self.bus
    }
}
