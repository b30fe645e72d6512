use std::path::PathBuf;

/// Errors raised by the binary object store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying filesystem failure
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted document could not be encoded or decoded
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored content is not valid base64
    #[error("stored content is not decodable: {0}")]
    Corrupt(#[from] base64::DecodeError),

    /// Configured capacity would be exceeded by this write
    #[error("store quota exceeded: {requested} bytes requested, {available} available")]
    QuotaExceeded { requested: u64, available: u64 },

    /// Id is empty or would escape the store directory
    #[error("invalid object id: {0:?}")]
    InvalidId(String),

    /// Store directory could not be prepared
    #[error("store directory unusable: {path}")]
    BadDirectory { path: PathBuf },
}

impl StoreError {
    /// Whether the failure should abort a multi-file submission.
    ///
    /// Every store failure is fatal to the enclosing operation; this exists
    /// so callers can distinguish quota exhaustion (user-fixable) from the
    /// rest when wording a message.
    #[inline]
    #[must_use]
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}
