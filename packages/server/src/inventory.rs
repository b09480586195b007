use std::sync::Arc;

use axum::body::Bytes;
use common::storage::{BoxReader, PhotoRef, PhotoStore, StorageError};
use thiserror::Error;
use tracing::info;

use crate::registry::{Item, ItemDraft, Registry, RegistryError};
use crate::search::render_summary;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Item {0} has no photo")]
    NoPhoto(u64),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A fully received photo upload, ready to be written.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub data: Bytes,
    pub extension: Option<String>,
}

/// Item registry coupled to photo storage.
///
/// Photos are always written before they are linked to a record, and every
/// photo a record stops referencing is released here.
pub struct Inventory {
    registry: Registry,
    photos: Arc<dyn PhotoStore>,
    origin: String,
}

impl Inventory {
    /// `origin` is the advertised `http://host:port` used in search output.
    pub fn new(photos: Arc<dyn PhotoStore>, origin: impl Into<String>) -> Self {
        Self {
            registry: Registry::new(),
            photos,
            origin: origin.into(),
        }
    }

    pub fn photos(&self) -> &dyn PhotoStore {
        &*self.photos
    }

    /// Register an item, storing its photo first when one is supplied.
    ///
    /// Validation runs before anything is written, so a rejected name leaves
    /// neither a record nor a stored photo behind.
    pub async fn register(
        &self,
        name: Option<&str>,
        description: Option<&str>,
        photo: Option<PhotoUpload>,
    ) -> Result<Item, InventoryError> {
        let draft = ItemDraft::new(name, description)?;

        let photo = match photo {
            Some(upload) => Some(self.store(&upload).await?),
            None => None,
        };

        let item = self.registry.insert(draft, photo);
        info!(id = item.id, has_photo = item.photo.is_some(), "Registered item");
        Ok(item)
    }

    pub fn get(&self, id: u64) -> Result<Item, InventoryError> {
        Ok(self.registry.get(id)?)
    }

    pub fn list(&self) -> Vec<Item> {
        self.registry.list()
    }

    pub fn update(
        &self,
        id: u64,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Item, InventoryError> {
        let item = self.registry.update(id, name, description)?;
        info!(id, "Updated item");
        Ok(item)
    }

    /// Store a new photo for an item and release the one it replaces.
    pub async fn attach_photo(
        &self,
        id: u64,
        upload: PhotoUpload,
    ) -> Result<Item, InventoryError> {
        // Fail before writing anything for an unknown item.
        self.registry.get(id)?;

        let photo = self.store(&upload).await?;
        match self.registry.set_photo(id, photo.clone()) {
            Ok((item, previous)) => {
                if let Some(previous) = previous {
                    self.photos.release(&previous).await;
                }
                info!(id, photo = %photo, "Attached photo");
                Ok(item)
            }
            Err(e) => {
                // Deleted while the photo was being written.
                self.photos.release(&photo).await;
                Err(e.into())
            }
        }
    }

    /// Delete an item together with its photo.
    pub async fn remove(&self, id: u64) -> Result<Item, InventoryError> {
        let item = self.registry.delete(id)?;
        if let Some(photo) = &item.photo {
            self.photos.release(photo).await;
        }
        info!(id, remaining = self.registry.len(), "Deleted item");
        Ok(item)
    }

    /// Open the photo stream of an item.
    pub async fn open_photo(&self, id: u64) -> Result<BoxReader, InventoryError> {
        let item = self.registry.get(id)?;
        let photo = item.photo.ok_or(InventoryError::NoPhoto(id))?;
        Ok(self.photos.retrieve(&photo).await?)
    }

    /// Plain-text summary of an item; see [`render_summary`].
    pub fn search(&self, id: u64, include_photo: bool) -> Result<String, InventoryError> {
        let item = self.registry.get(id)?;
        Ok(render_summary(&item, include_photo, &self.origin))
    }

    async fn store(&self, upload: &PhotoUpload) -> Result<PhotoRef, StorageError> {
        self.photos
            .store(&upload.data, upload.extension.as_deref())
            .await
    }
}
