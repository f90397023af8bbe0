use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, handlers, models};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::item::read_root,
        handlers::item::check_item,
        handlers::item::get_history,
    ),
    components(
        schemas(
            models::ItemRequest,
            models::ItemClassification,
            models::ClassificationRecord,
            models::HistoryResponse,
            models::WelcomeResponse,
            models::ErrorResponse,
        )
    ),
    tags(
        (name = "Items", description = "Carry-on and checked bag item checks"),
    ),
    info(
        title = "TSA Item Checker API",
        description = "An API to check if an item is allowed in carry-on or checked baggage."
    )
)]
pub struct ApiDoc;

/// Build the full application router
///
/// CORS is permissive: the API is meant to be called from any browser origin.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/", get(handlers::item::read_root))
        .route("/check-item", post(handlers::item::check_item))
        .route("/history", get(handlers::item::get_history))
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::ready_check));

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(api_routes)
        .merge(health_routes)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
}
