use std::path::Path;

use async_trait::async_trait;

use super::error::StorageError;

/// An image persisted by an [`ImageStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Public URL path recorded on the owning row, e.g. `/uploads/0193...-bolt.png`.
    pub public_path: String,
    /// Generated on-disk file name.
    pub file_name: String,
    /// Size in bytes.
    pub size: u64,
}

/// Storage for uploaded images, addressed by public path.
///
/// The store does no reference counting: each image belongs to whichever row
/// records its public path, and removing that row's image is the caller's job.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `data` under a fresh name derived from `original_name`.
    async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredImage, StorageError>;

    /// Remove the image at `public_path`.
    ///
    /// Returns `true` if a file was deleted, `false` if it did not exist.
    async fn remove(&self, public_path: &str) -> Result<bool, StorageError>;

    /// Directory served under the public prefix.
    fn root(&self) -> &Path;

    /// URL prefix of every public path handed out by this store.
    fn public_prefix(&self) -> &str;
}
