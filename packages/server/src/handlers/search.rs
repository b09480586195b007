use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::form::AppForm;
use crate::models::search::SearchForm;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/search",
    tag = "Search",
    operation_id = "searchItem",
    summary = "Look up an item by ID",
    description = "Returns a plain-text summary with `ID`, `Name` and `Description` lines. A \
        `Photo` line with an absolute link is appended when `has_photo` is `on` and the item has \
        a photo.",
    request_body(content = SearchForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Item summary", body = String, content_type = "text/plain"),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, form))]
pub async fn search_item(
    State(state): State<AppState>,
    form: Result<AppForm<SearchForm>, AppError>,
) -> Result<String, AppError> {
    // No usable form means no usable id.
    let form = form.map(|AppForm(form)| form).unwrap_or_default();
    let id = form.item_id().ok_or_else(|| {
        AppError::NotFound(format!(
            "Item '{}' not found",
            form.id.as_deref().unwrap_or_default()
        ))
    })?;
    Ok(state.inventory.search(id, form.include_photo())?)
}
