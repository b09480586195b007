use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufReader};

use super::error::StorageError;
use super::photo_ref::PhotoRef;
use super::traits::{BoxReader, PhotoStore};

const TEMP_DIR: &str = ".tmp";

/// Filesystem-backed photo store.
///
/// Photos live flat in `{base_path}/{reference}`. Writes land in
/// `{base_path}/.tmp` first and are renamed into place once synced, so a
/// reference never points at a partially written file.
pub struct FilesystemPhotoStore {
    base_path: PathBuf,
    max_size: u64,
}

impl FilesystemPhotoStore {
    /// Create a new filesystem photo store, creating the directory if missing.
    pub async fn new(base_path: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        if !fs::try_exists(&base_path).await? {
            fs::create_dir_all(&base_path).await?;
            tracing::info!(path = %base_path.display(), "Cache directory created");
        }
        fs::create_dir_all(base_path.join(TEMP_DIR)).await?;
        Ok(Self {
            base_path,
            max_size,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn photo_path(&self, photo: &PhotoRef) -> PathBuf {
        self.base_path.join(photo.as_str())
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(TEMP_DIR)
            .join(uuid::Uuid::new_v4().to_string())
    }

    async fn write_temp(&self, temp_path: &Path, data: &[u8]) -> Result<(), StorageError> {
        let mut file = fs::File::create(temp_path).await?;
        file.write_all(data).await?;
        file.flush().await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl PhotoStore for FilesystemPhotoStore {
    async fn store(
        &self,
        data: &[u8],
        extension: Option<&str>,
    ) -> Result<PhotoRef, StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let photo = PhotoRef::generate(extension);
        let photo_path = self.photo_path(&photo);
        let temp_path = self.temp_path();

        if let Err(e) = self.write_temp(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &photo_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(photo = %photo, size = data.len(), "Stored photo");
        Ok(photo)
    }

    async fn retrieve(&self, photo: &PhotoRef) -> Result<BoxReader, StorageError> {
        match fs::File::open(self.photo_path(photo)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(photo.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, photo: &PhotoRef) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.photo_path(photo)).await?)
    }

    async fn delete(&self, photo: &PhotoRef) -> Result<bool, StorageError> {
        match fs::remove_file(self.photo_path(photo)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
