/// Errors raised by the notification bus.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Underlying filesystem failure
    #[error("notification log i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted log could not be encoded or decoded
    #[error("notification log serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Log directory could not be prepared
    #[error("notification log directory unusable")]
    BadDirectory,
}
