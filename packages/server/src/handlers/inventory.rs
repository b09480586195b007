use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::multipart::AppMultipart;
use crate::extractors::path::ItemId;
use crate::models::inventory::{ItemResponse, RegisterForm, UpdateItemRequest, photo_upload};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/register",
    tag = "Inventory",
    operation_id = "registerItem",
    summary = "Register a new inventory item",
    description = "Creates an item from a multipart form. `inventory_name` is required and must \
        not be blank. `description` defaults to empty. An optional `photo` file is stored before \
        the item becomes visible.",
    request_body(content_type = "multipart/form-data", description = "inventory_name, description, photo"),
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Missing or blank name (VALIDATION_ERROR)", body = ErrorBody),
        (status = 413, description = "Photo too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, form))]
pub async fn register_item(
    State(state): State<AppState>,
    AppMultipart(form): AppMultipart<RegisterForm>,
) -> Result<impl IntoResponse, AppError> {
    let photo = form.photo.and_then(photo_upload);
    let item = state
        .inventory
        .register(
            form.inventory_name.as_deref(),
            form.description.as_deref(),
            photo,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

#[utoipa::path(
    get,
    path = "/inventory",
    tag = "Inventory",
    operation_id = "listItems",
    summary = "List all inventory items",
    description = "Returns every item in creation order.",
    responses(
        (status = 200, description = "All items", body = Vec<ItemResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<ItemResponse>> {
    Json(
        state
            .inventory
            .list()
            .into_iter()
            .map(ItemResponse::from)
            .collect(),
    )
}

#[utoipa::path(
    get,
    path = "/inventory/{id}",
    tag = "Inventory",
    operation_id = "getItem",
    summary = "Get an item by ID",
    params(("id" = u64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item details", body = ItemResponse),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<ItemResponse>, AppError> {
    Ok(Json(state.inventory.get(id)?.into()))
}

#[utoipa::path(
    put,
    path = "/inventory/{id}",
    tag = "Inventory",
    operation_id = "updateItem",
    summary = "Update an item's name or description",
    description = "Only fields that are present and non-blank are changed; everything else keeps \
        its current value. An empty body returns the item unchanged.",
    params(("id" = u64, Path, description = "Item ID")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, description = "Malformed JSON (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    AppJson(payload): AppJson<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    if payload == UpdateItemRequest::default() {
        return Ok(Json(state.inventory.get(id)?.into()));
    }

    let item = state.inventory.update(
        id,
        payload.name.as_deref(),
        payload.description.as_deref(),
    )?;
    Ok(Json(item.into()))
}

#[utoipa::path(
    delete,
    path = "/inventory/{id}",
    tag = "Inventory",
    operation_id = "deleteItem",
    summary = "Delete an item",
    description = "Removes the item and its stored photo. The ID is never reused.",
    params(("id" = u64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<StatusCode, AppError> {
    state.inventory.remove(id).await?;
    Ok(StatusCode::OK)
}
