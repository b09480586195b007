use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::{inventory, photo, search};
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(item_routes())
        .merge(upload_routes(config))
        .routes(routes!(search::search_item))
}

fn item_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(inventory::list_items))
        .routes(routes!(
            inventory::get_item,
            inventory::update_item,
            inventory::delete_item
        ))
}

fn upload_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(inventory::register_item))
        .routes(routes!(photo::get_photo, photo::update_photo))
        .layer(photo::photo_upload_body_limit(
            config.storage.max_photo_size,
        ))
}
