/// Errors raised by the metadata registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Underlying filesystem failure
    #[error("registry i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted list could not be encoded or decoded
    #[error("registry serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An insert would duplicate an existing submission id
    #[error("duplicate submission id: {0}")]
    DuplicateId(String),

    /// Registry directory could not be prepared
    #[error("registry directory unusable")]
    BadDirectory,
}
