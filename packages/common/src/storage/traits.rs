use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use super::photo_ref::PhotoRef;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Storage for photo blobs addressed by generated references.
///
/// Every write goes through [`PhotoStore::store`], which only returns once the
/// blob is durably in place, so a reference handed out by the store can always
/// be linked to a record immediately.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store bytes under a freshly generated reference.
    async fn store(&self, data: &[u8], extension: Option<&str>)
    -> Result<PhotoRef, StorageError>;

    /// Open a stored photo as a streaming async reader.
    async fn retrieve(&self, photo: &PhotoRef) -> Result<BoxReader, StorageError>;

    /// Check whether a photo exists.
    async fn exists(&self, photo: &PhotoRef) -> Result<bool, StorageError>;

    /// Delete a photo.
    ///
    /// Returns `true` if the photo was deleted, `false` if it did not exist.
    async fn delete(&self, photo: &PhotoRef) -> Result<bool, StorageError>;

    /// Retrieve all bytes of a stored photo.
    async fn read(&self, photo: &PhotoRef) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.retrieve(photo).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Best-effort deletion. Missing photos and I/O failures are logged, never returned.
    async fn release(&self, photo: &PhotoRef) {
        match self.delete(photo).await {
            Ok(true) => tracing::debug!(photo = %photo, "Released photo"),
            Ok(false) => tracing::debug!(photo = %photo, "Photo already gone"),
            Err(e) => tracing::warn!(photo = %photo, error = %e, "Failed to release photo"),
        }
    }

    /// Store the new bytes, then dispose of the superseded photo if there was one.
    async fn replace(
        &self,
        old: Option<&PhotoRef>,
        data: &[u8],
        extension: Option<&str>,
    ) -> Result<PhotoRef, StorageError> {
        let new_ref = self.store(data, extension).await?;
        if let Some(old) = old
            && old != &new_ref
        {
            self.release(old).await;
        }
        Ok(new_ref)
    }
}
