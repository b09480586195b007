pub mod cli;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod inventory;
pub mod models;
pub mod registry;
pub mod routes;
pub mod search;
pub mod state;

use std::time::Duration;

use axum::handler::HandlerWithoutStateExt;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "inventory_server=info,common=info,tower_http=info";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Service",
        version = "1.0.0",
        description = "Register inventory items, attach photos and look items up by ID"
    ),
    tags(
        (name = "Inventory", description = "Item registration and CRUD"),
        (name = "Photos", description = "Item photo upload and download"),
        (name = "Search", description = "Plain-text lookup by item ID"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::api_routes(&state.config))
        .split_for_parts();

    let forms = ServeDir::new(&state.config.server.public_dir)
        .fallback(handlers::docs::method_not_allowed.into_service());
    let cors = cors_layer(&state.config.server.cors);

    let app = router
        .route("/", get(handlers::docs::redirect_to_docs))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .fallback_service(forms)
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

fn cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(Duration::from_secs(config.max_age)),
    )
}
