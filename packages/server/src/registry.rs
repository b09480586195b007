use std::sync::atomic::{AtomicU64, Ordering};

use common::storage::PhotoRef;
use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{0}")]
    Validation(String),

    #[error("Item {0} not found")]
    NotFound(u64),
}

/// An inventory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub photo: Option<PhotoRef>,
}

impl Item {
    /// Public URL path of the item's photo, if one is attached.
    pub fn photo_url(&self) -> Option<String> {
        self.photo.as_ref().map(|_| photo_path(self.id))
    }
}

/// Canonical retrieval path for an item's photo.
pub fn photo_path(id: u64) -> String {
    format!("/inventory/{id}/photo")
}

/// Validated fields for an item that has not been registered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    name: String,
    description: String,
}

impl ItemDraft {
    pub fn new(name: Option<&str>, description: Option<&str>) -> Result<Self, RegistryError> {
        let name = non_blank(name)
            .ok_or_else(|| RegistryError::Validation("inventory_name is required".into()))?;
        Ok(Self {
            name: name.to_string(),
            description: description.map(str::trim).unwrap_or_default().to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// In-memory item store with a never-reused identifier sequence.
///
/// Records are locked per entry, so operations on different ids run in
/// parallel while a delete and an update on the same id are serialized.
#[derive(Debug)]
pub struct Registry {
    items: DashMap<u64, Item>,
    next_id: AtomicU64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Validate and register a new item without a photo.
    pub fn create(
        &self,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Item, RegistryError> {
        let draft = ItemDraft::new(name, description)?;
        Ok(self.insert(draft, None))
    }

    /// Register a validated draft, linking an already stored photo if given.
    pub fn insert(&self, draft: ItemDraft, photo: Option<PhotoRef>) -> Item {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let item = Item {
            id,
            name: draft.name,
            description: draft.description,
            photo,
        };
        self.items.insert(id, item.clone());
        item
    }

    pub fn get(&self, id: u64) -> Result<Item, RegistryError> {
        self.items
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(RegistryError::NotFound(id))
    }

    /// All items in creation order.
    pub fn list(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.iter().map(|e| e.value().clone()).collect();
        // Ids are allocated in creation order.
        items.sort_unstable_by_key(|item| item.id);
        items
    }

    /// Replace name and/or description. Absent or blank values keep the current field.
    pub fn update(
        &self,
        id: u64,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Item, RegistryError> {
        let mut entry = self.items.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        if let Some(name) = non_blank(name) {
            entry.name = name.to_string();
        }
        if let Some(description) = non_blank(description) {
            entry.description = description.to_string();
        }
        Ok(entry.clone())
    }

    /// Link a stored photo, returning the updated item and the superseded reference.
    ///
    /// Disposing of the superseded photo is the caller's job.
    pub fn set_photo(
        &self,
        id: u64,
        photo: PhotoRef,
    ) -> Result<(Item, Option<PhotoRef>), RegistryError> {
        let mut entry = self.items.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        let previous = entry.photo.replace(photo);
        Ok((entry.clone(), previous))
    }

    /// Remove an item and hand it back so its photo can be released.
    pub fn delete(&self, id: u64) -> Result<Item, RegistryError> {
        self.items
            .remove(&id)
            .map(|(_, item)| item)
            .ok_or(RegistryError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
