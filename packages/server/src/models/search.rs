use serde::Deserialize;

use crate::extractors::path::parse_item_id;

/// Form body of `POST /search`.
#[derive(Default, Deserialize, utoipa::ToSchema)]
pub struct SearchForm {
    /// Item identifier.
    #[schema(example = "7")]
    pub id: Option<String>,
    /// Checkbox value; `"on"` asks for the photo link.
    #[schema(example = "on")]
    pub has_photo: Option<String>,
}

impl SearchForm {
    /// Requested identifier, `None` if it cannot name an item.
    pub fn item_id(&self) -> Option<u64> {
        self.id.as_deref().and_then(parse_item_id)
    }

    pub fn include_photo(&self) -> bool {
        self.has_photo.as_deref() == Some("on")
    }
}
