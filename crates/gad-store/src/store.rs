use crate::blob::StoredBlob;
use crate::error::StoreError;
use crate::persist;
use std::path::{Path, PathBuf};

/// Blob store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root data directory; blobs live under `<root>/blobs`.
    pub root: PathBuf,
    /// Optional cap on total encoded bytes, the local analog of a browser
    /// storage quota. `None` means unbounded.
    pub max_total_bytes: Option<u64>,
}

impl StoreConfig {
    /// Configuration rooted at `root` with no capacity limit.
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_total_bytes: None,
        }
    }

    /// Set a total capacity in encoded bytes.
    #[inline]
    #[must_use]
    pub fn with_capacity(mut self, max_total_bytes: u64) -> Self {
        self.max_total_bytes = Some(max_total_bytes);
        self
    }
}

/// Keyed storage for uploaded file bytes.
///
/// One JSON document per submission id. The store is addressed only by id;
/// it is never enumerated to answer business queries.
///
/// # Invariants
/// - `put` is all-or-nothing: readers observe either the old document or
///   the new one, never a partial write
/// - `delete` is idempotent
/// - a duplicate id overwrites silently (id generation upstream makes this
///   practically unreachable)
#[derive(Debug)]
pub struct BlobStore {
    blob_dir: PathBuf,
    max_total_bytes: Option<u64>,
}

impl BlobStore {
    /// Open (creating if needed) the blob directory under `config.root`.
    ///
    /// # Errors
    /// Returns [`StoreError::BadDirectory`] if the directory cannot be
    /// created.
    pub async fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let blob_dir = config.root.join("blobs");
        tokio::fs::create_dir_all(&blob_dir)
            .await
            .map_err(|_| StoreError::BadDirectory {
                path: blob_dir.clone(),
            })?;
        Ok(Self {
            blob_dir,
            max_total_bytes: config.max_total_bytes,
        })
    }

    /// Store `bytes` under `id`, overwriting any existing entry.
    ///
    /// # Errors
    /// - [`StoreError::InvalidId`] for an empty id or one containing path
    ///   separators
    /// - [`StoreError::QuotaExceeded`] when the configured capacity would
    ///   be exceeded; nothing is written in that case
    /// - [`StoreError::Io`]/[`StoreError::Serialization`] on persistence
    ///   failure
    pub async fn put(
        &self,
        id: &str,
        bytes: &[u8],
        name: &str,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        let blob = StoredBlob::from_bytes(bytes, name, content_type);

        if let Some(cap) = self.max_total_bytes {
            let used = self.used_bytes().await?;
            let available = cap.saturating_sub(used);
            if blob.encoded_len() > available {
                return Err(StoreError::QuotaExceeded {
                    requested: blob.encoded_len(),
                    available,
                });
            }
        }

        let doc = serde_json::to_vec(&blob)?;
        persist::write_atomic(&path, &doc).await?;
        tracing::debug!(%id, size = blob.size, "blob stored");
        Ok(())
    }

    /// Fetch the blob stored under `id`, if any.
    ///
    /// # Errors
    /// Propagates i/o and deserialization failures; a missing id is `None`,
    /// not an error.
    pub async fn get(&self, id: &str) -> Result<Option<StoredBlob>, StoreError> {
        let path = self.path_for(id)?;
        match persist::read_optional(&path).await? {
            Some(doc) => Ok(Some(serde_json::from_slice(&doc)?)),
            None => Ok(None),
        }
    }

    /// Remove the blob stored under `id`. Missing ids are a no-op success.
    ///
    /// # Errors
    /// Propagates i/o failures other than "not found".
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        persist::remove_idempotent(&path).await?;
        tracing::debug!(%id, "blob deleted");
        Ok(())
    }

    /// Whether an entry exists under `id`.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidId`] for malformed ids.
    pub async fn contains(&self, id: &str) -> Result<bool, StoreError> {
        let path = self.path_for(id)?;
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false))
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.blob_dir.join(format!("{id}.json")))
    }

    async fn used_bytes(&self) -> Result<u64, StoreError> {
        let mut total = 0u64;
        let mut entries = tokio::fs::read_dir(&self.blob_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            total += entry.metadata().await?.len();
        }
        Ok(total)
    }

    /// The directory blobs are written to. Exposed for diagnostics.
    #[inline]
    #[must_use]
    pub fn blob_dir(&self) -> &Path {
        &self.blob_dir
    }
}
