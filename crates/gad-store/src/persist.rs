//! Atomic file persistence shared by the databank's local stores.
//!
//! Every store in the workspace rewrites whole documents; a half-written
//! JSON file is indistinguishable from corruption, so all writes go through
//! a temp-file-then-rename sequence. Rename is atomic on the platforms we
//! care about, which gives each `put`/rewrite all-or-nothing visibility.

use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Write `bytes` to `path` atomically.
///
/// # Errors
/// Propagates the underlying filesystem error; on failure the previous
/// contents of `path` (if any) are left intact.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    {
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
    }
    tokio::fs::rename(&tmp, path).await
}

/// Read a whole file, mapping "not found" to `None`.
///
/// # Errors
/// Any error other than `NotFound` is propagated.
pub async fn read_optional(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Delete a file, treating "not found" as success.
///
/// # Errors
/// Any error other than `NotFound` is propagated.
pub async fn remove_idempotent(path: &Path) -> std::io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        write_atomic(&path, b"{\"k\":1}").await.unwrap();
        assert_eq!(read_optional(&path).await.unwrap().unwrap(), b"{\"k\":1}");
    }

    #[tokio::test]
    async fn read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_optional(&dir.path().join("absent.json"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        write_atomic(&path, b"x").await.unwrap();

        remove_idempotent(&path).await.unwrap();
        remove_idempotent(&path).await.unwrap();
    }
}
