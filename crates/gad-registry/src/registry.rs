use crate::error::RegistryError;
use crate::record::SubmissionRecord;
use gad_store::persist;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Ordered collection of submission records, persisted as one JSON list.
///
/// Reads always load the full list; mutations rewrite the full list. An
/// in-process async mutex serializes mutations so a batch insert is never
/// interleaved with another writer in the same process. Nothing guards
/// against a second process; last write wins there by design.
#[derive(Debug)]
pub struct Registry {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl Registry {
    /// Open (creating the directory if needed) the registry under `root`.
    ///
    /// # Errors
    /// Returns [`RegistryError::BadDirectory`] if `root` cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|_| RegistryError::BadDirectory)?;
        Ok(Self {
            path: root.join("submissions.json"),
            write_lock: Mutex::new(()),
        })
    }

    /// All records, most-recently-created first. A missing file is an
    /// empty registry.
    ///
    /// # Errors
    /// Propagates i/o and deserialization failures.
    pub async fn list(&self) -> Result<Vec<SubmissionRecord>, RegistryError> {
        match persist::read_optional(&self.path).await? {
            Some(doc) => Ok(serde_json::from_slice(&doc)?),
            None => Ok(Vec::new()),
        }
    }

    /// Prepend `records` to the front of the list, preserving both their
    /// relative order and the order of everything already present.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateId`] (writing nothing) if any
    /// incoming id collides with the batch or with an existing record.
    pub async fn insert_many(&self, records: Vec<SubmissionRecord>) -> Result<(), RegistryError> {
        let _guard = self.write_lock.lock().await;
        let existing = self.list().await?;

        let mut seen: HashSet<&str> = existing.iter().map(|r| r.id.as_str()).collect();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(RegistryError::DuplicateId(record.id.clone()));
            }
        }

        let mut all = records;
        let inserted = all.len();
        all.extend(existing);
        self.write_all(&all).await?;
        tracing::debug!(inserted, total = all.len(), "registry batch inserted");
        Ok(())
    }

    /// Apply `transform` to every record matching `predicate`, rewrite the
    /// list, and return the records that were transformed (in list order).
    ///
    /// # Errors
    /// Propagates persistence failures; no records are changed in that case.
    pub async fn update_where<P, F>(
        &self,
        predicate: P,
        transform: F,
    ) -> Result<Vec<SubmissionRecord>, RegistryError>
    where
        P: Fn(&SubmissionRecord) -> bool,
        F: Fn(SubmissionRecord) -> SubmissionRecord,
    {
        let _guard = self.write_lock.lock().await;
        let mut updated = Vec::new();
        let all: Vec<SubmissionRecord> = self
            .list()
            .await?
            .into_iter()
            .map(|record| {
                if predicate(&record) {
                    let next = transform(record);
                    updated.push(next.clone());
                    next
                } else {
                    record
                }
            })
            .collect();

        if !updated.is_empty() {
            self.write_all(&all).await?;
        }
        Ok(updated)
    }

    /// Drop every record matching `predicate`. Matching nothing is a no-op.
    ///
    /// # Errors
    /// Propagates persistence failures.
    pub async fn remove_where<P>(&self, predicate: P) -> Result<(), RegistryError>
    where
        P: Fn(&SubmissionRecord) -> bool,
    {
        let _guard = self.write_lock.lock().await;
        let before = self.list().await?;
        let kept: Vec<SubmissionRecord> =
            before.into_iter().filter(|r| !predicate(r)).collect();
        self.write_all(&kept).await
    }

    /// Find one record by id. Full scan, like every other read.
    ///
    /// # Errors
    /// Propagates persistence failures.
    pub async fn find(&self, id: &str) -> Result<Option<SubmissionRecord>, RegistryError> {
        Ok(self.list().await?.into_iter().find(|r| r.id == id))
    }

    async fn write_all(&self, records: &[SubmissionRecord]) -> Result<(), RegistryError> {
        let doc = serde_json::to_vec(records)?;
        persist::write_atomic(&self.path, &doc).await?;
        Ok(())
    }
}
