use axum::body::Bytes;
use axum_typed_multipart::{FieldData, TryFromMultipart};
use common::storage::extension_hint;
use serde::{Deserialize, Serialize};

use crate::inventory::PhotoUpload;
use crate::registry::Item;

/// Multipart body of `POST /register`.
#[derive(TryFromMultipart)]
pub struct RegisterForm {
    pub inventory_name: Option<String>,
    pub description: Option<String>,
    #[form_data(limit = "unlimited")]
    pub photo: Option<FieldData<Bytes>>,
}

/// Multipart body of `PUT /inventory/{id}/photo`.
#[derive(Default, TryFromMultipart)]
pub struct PhotoForm {
    #[form_data(limit = "unlimited")]
    pub photo: Option<FieldData<Bytes>>,
}

/// Turn an uploaded file part into a [`PhotoUpload`].
///
/// Browsers submit an empty, nameless part for an untouched file input; that
/// counts as no photo.
pub fn photo_upload(field: FieldData<Bytes>) -> Option<PhotoUpload> {
    let FieldData { metadata, contents } = field;
    let file_name = metadata.file_name.as_deref().filter(|n| !n.is_empty());
    if contents.is_empty() && file_name.is_none() {
        return None;
    }
    Some(PhotoUpload {
        extension: extension_hint(file_name, metadata.content_type.as_deref()),
        data: contents,
    })
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateItemRequest {
    /// New name. Omitted or blank keeps the current one.
    #[schema(example = "Cordless drill")]
    pub name: Option<String>,
    /// New description. Omitted or blank keeps the current one.
    #[schema(example = "18V, two batteries")]
    pub description: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ItemResponse {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Drill")]
    pub name: String,
    #[schema(example = "Cordless")]
    pub description: String,
    /// `/inventory/{id}/photo` when a photo is attached, otherwise `null`.
    #[serde(rename = "photoUrl")]
    #[schema(example = "/inventory/1/photo")]
    pub photo_url: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            photo_url: item.photo_url(),
            id: item.id,
            name: item.name,
            description: item.description,
        }
    }
}
