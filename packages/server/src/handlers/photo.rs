use axum::Json;
use axum::body::Body;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::multipart::OptionalMultipart;
use crate::extractors::path::ItemId;
use crate::models::inventory::{ItemResponse, PhotoForm, photo_upload};
use crate::state::AppState;

/// Room for multipart boundaries and the text fields around the photo.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Body limit for routes that accept a photo upload.
pub fn photo_upload_body_limit(max_photo_size: u64) -> DefaultBodyLimit {
    let limit = max_photo_size.saturating_add(MULTIPART_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    get,
    path = "/inventory/{id}/photo",
    tag = "Photos",
    operation_id = "getPhoto",
    summary = "Download an item's photo",
    description = "Streams the stored photo as `image/jpeg`.",
    params(("id" = u64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Photo content (image/jpeg)"),
        (status = 404, description = "Item or photo not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_photo(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Response, AppError> {
    let reader = state.inventory.open_photo(id).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/jpeg")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

#[utoipa::path(
    put,
    path = "/inventory/{id}/photo",
    tag = "Photos",
    operation_id = "updatePhoto",
    summary = "Replace an item's photo",
    description = "Stores the uploaded `photo` and links it to the item; the previous photo is \
        deleted. Without a `photo` part the item is returned unchanged.",
    params(("id" = u64, Path, description = "Item ID")),
    request_body(content_type = "multipart/form-data", description = "photo"),
    responses(
        (status = 200, description = "Photo updated", body = ItemResponse),
        (status = 400, description = "Malformed multipart body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
        (status = 413, description = "Photo too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, form))]
pub async fn update_photo(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    form: Result<OptionalMultipart<PhotoForm>, AppError>,
) -> Result<Json<ItemResponse>, AppError> {
    // An unknown item is reported before any complaint about the body.
    state.inventory.get(id)?;
    let OptionalMultipart(form) = form?;

    let item = match form.photo.and_then(photo_upload) {
        Some(upload) => state.inventory.attach_photo(id, upload).await?,
        None => state.inventory.get(id)?,
    };
    Ok(Json(item.into()))
}
