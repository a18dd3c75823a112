//! Local disk file storage
//!
//! Attachments are written under a single root directory. The locator handed
//! back to callers is the bare file name inside that directory.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::storage::FileStorage;
use crate::error::TaskResult;

#[derive(Debug, Clone)]
pub struct DiskFileStorage {
    root: PathBuf,
}

impl DiskFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist
    pub async fn ensure_root(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    fn resolve(&self, locator: &str) -> io::Result<PathBuf> {
        let valid = !locator.is_empty()
            && locator != "."
            && locator != ".."
            && !locator.contains(['/', '\\']);
        if !valid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid storage locator: {locator:?}"),
            ));
        }
        Ok(self.root.join(locator))
    }
}

/// Reduce a client-supplied name to a safe single path component
fn sanitize_file_name(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

impl FileStorage for DiskFileStorage {
    async fn store(&self, filename: &str, bytes: &[u8]) -> TaskResult<String> {
        self.ensure_root().await?;

        let locator = format!("{}-{}", Uuid::new_v4().simple(), sanitize_file_name(filename));
        let path = self.resolve(&locator)?;
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored file");
        Ok(locator)
    }

    async fn delete(&self, locator: &str) -> TaskResult<()> {
        let path = self.resolve(locator)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Stored file already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, locator: &str) -> TaskResult<bool> {
        let path = self.resolve(locator)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }
}
