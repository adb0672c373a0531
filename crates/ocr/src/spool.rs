//! Scoped lifecycle for temporary crop files.

use std::path::{Path, PathBuf};
use tracing::warn;

/// Writes crops into an injectable root directory under collision-proof
/// random names. Each written file comes back as a [`SpooledImage`] guard
/// that deletes the file when dropped.
#[derive(Debug, Clone)]
pub struct TempSpool {
    root: PathBuf,
    prefix: String,
}

impl TempSpool {
    #[must_use]
    pub fn new(root: PathBuf, prefix: String) -> Self {
        Self { root, prefix }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `bytes` to a freshly named file under the spool root.
    ///
    /// The name carries 128 bits of randomness, so concurrent batches never
    /// need a shared counter or lock to avoid collisions.
    ///
    /// # Errors
    ///
    /// Fails if the root cannot be created or the file cannot be written.
    pub async fn write(&self, bytes: &[u8]) -> std::io::Result<SpooledImage> {
        tokio::fs::create_dir_all(&self.root).await?;

        let name = format!(
            "{}{:016x}{:016x}.png",
            self.prefix,
            fastrand::u64(..),
            fastrand::u64(..)
        );
        let path = self.root.join(name);
        tokio::fs::write(&path, bytes).await?;
        Ok(SpooledImage { path })
    }
}

/// Owning guard for one spooled file. Deleting happens exactly once, on drop,
/// which covers success, error, and cancellation of the enclosing operation.
#[derive(Debug)]
pub struct SpooledImage {
    path: PathBuf,
}

impl SpooledImage {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SpooledImage {
    fn drop(&mut self) {
        // A leaked temp file must never fail the caller's operation.
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!("failed to delete temp file {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_creates_file_and_drop_deletes_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spool = TempSpool::new(dir.path().to_path_buf(), "ocr_".into());

        let spooled = spool.write(b"fake png bytes").await.expect("write");
        let path = spooled.path().to_path_buf();
        assert!(path.exists());
        assert!(
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("ocr_") && n.ends_with(".png"))
        );

        drop(spooled);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn concurrent_writes_get_distinct_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spool = TempSpool::new(dir.path().to_path_buf(), "ocr_".into());

        let a = spool.write(b"a").await.expect("write a");
        let b = spool.write(b"b").await.expect("write b");
        assert_ne!(a.path(), b.path());
    }

    #[tokio::test]
    async fn missing_root_is_created_on_demand() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("spool").join("crops");
        let spool = TempSpool::new(nested.clone(), "ocr_".into());

        let spooled = spool.write(b"bytes").await.expect("write");
        assert!(spooled.path().starts_with(&nested));
    }

    #[tokio::test]
    async fn already_deleted_file_does_not_panic_on_drop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spool = TempSpool::new(dir.path().to_path_buf(), "ocr_".into());

        let spooled = spool.write(b"bytes").await.expect("write");
        std::fs::remove_file(spooled.path()).expect("external delete");
        drop(spooled);
    }
}
