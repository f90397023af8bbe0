//! Item check API
//!
//! Thin adapters between HTTP and [`ClassificationService`](crate::services::ClassificationService).

use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::models::{
    ErrorResponse, HistoryResponse, ItemClassification, ItemRequest, WelcomeResponse,
};
use crate::utils::ApiResult;

pub const WELCOME_MESSAGE: &str =
    "Welcome to the TSA Item Checker API. Go to /docs for more info.";

/// Accepts an item name and returns its carry-on and checked bag status
#[utoipa::path(
    post,
    path = "/check-item",
    request_body = ItemRequest,
    responses(
        (status = 200, description = "Classification for the item", body = ItemClassification),
        (status = 500, description = "Malformed model output or upstream failure", body = ErrorResponse)
    ),
    tag = "Items"
)]
pub async fn check_item(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ItemRequest>,
) -> ApiResult<Json<ItemClassification>> {
    let classification = state.classification_service.classify(&request.item_name).await?;
    Ok(Json(classification))
}

/// Every stored check, most recent first
#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "Stored checks, newest first", body = HistoryResponse),
        (status = 500, description = "History backend unavailable", body = ErrorResponse)
    ),
    tag = "Items"
)]
pub async fn get_history(State(state): State<Arc<AppState>>) -> ApiResult<Json<HistoryResponse>> {
    let history = state.classification_service.list_history().await?;
    Ok(Json(HistoryResponse { history }))
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = WelcomeResponse)),
    tag = "Items"
)]
pub async fn read_root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse { message: WELCOME_MESSAGE.to_string() })
}
