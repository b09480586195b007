use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;

/// Item identifier taken from the `{id}` path segment.
///
/// Anything that is not a positive integer cannot name an item, so it is
/// reported as not found rather than as a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub u64);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.body_text()))?;
        parse_item_id(&raw)
            .map(ItemId)
            .ok_or_else(|| AppError::NotFound(format!("Item '{raw}' not found")))
    }
}

/// Parse a client-supplied identifier. Zero and non-numeric input yield `None`.
pub fn parse_item_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|&id| id > 0)
}
