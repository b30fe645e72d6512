use crate::error::StoreError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Persisted value of the binary object store.
///
/// The field layout matches the keyed-store entry described in the data
/// contract: `{content, name, type, size}`, with `content` carried as
/// base64 so the document stays valid JSON while remaining losslessly
/// reversible to the original bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlob {
    content: String,
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: u64,
}

impl StoredBlob {
    /// Encode raw file bytes into a storable blob.
    ///
    /// `size` is always the raw byte length, not the encoded length.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], name: &str, content_type: &str) -> Self {
        Self {
            content: BASE64.encode(bytes),
            name: name.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len() as u64,
        }
    }

    /// Decode the stored content back to the original bytes.
    ///
    /// # Errors
    /// Returns [`StoreError::Corrupt`] if the persisted content is not
    /// valid base64 (manual tampering or partial write outside our control).
    pub fn bytes(&self) -> Result<Vec<u8>, StoreError> {
        Ok(BASE64.decode(&self.content)?)
    }

    /// Encoded length in bytes, used for quota accounting.
    #[inline]
    #[must_use]
    pub fn encoded_len(&self) -> u64 {
        self.content.len() as u64
    }
}
