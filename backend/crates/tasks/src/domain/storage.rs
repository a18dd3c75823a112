//! File Storage Trait

use crate::error::TaskResult;

/// Blob storage for attachment contents
#[trait_variant::make(FileStorage: Send)]
pub trait LocalFileStorage {
    /// Store bytes under a name derived from `filename`, returning a locator
    async fn store(&self, filename: &str, bytes: &[u8]) -> TaskResult<String>;

    /// Remove stored bytes; a missing locator is not an error
    async fn delete(&self, locator: &str) -> TaskResult<()>;

    /// Check whether the locator refers to stored bytes
    async fn exists(&self, locator: &str) -> TaskResult<bool>;
}
