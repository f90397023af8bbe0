// HTTP surface tests: /, /check-item, /history

use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::handlers::item::WELCOME_MESSAGE;
use crate::models::NewClassificationRecord;
use crate::services::{ClassificationStore, StoreError};
use crate::tests::common::{
    body_json, create_test_app, create_test_store, create_unreachable_app, empty_request,
    json_request,
};

const LAPTOP_REPLY: &str = r#"{"carry_on": true, "checked_bag": true, "description": "x"}"#;

/// Store double whose backend is down
struct DownStore;

#[async_trait::async_trait]
impl ClassificationStore for DownStore {
    fn name(&self) -> &'static str {
        "down"
    }

    async fn insert(&self, _record: &NewClassificationRecord) -> Result<(), StoreError> {
        Err(StoreError::Api("500 Internal Server Error: boom".to_string()))
    }

    async fn list_recent(
        &self,
    ) -> Result<Vec<crate::models::ClassificationRecord>, StoreError> {
        Err(StoreError::Api("500 Internal Server Error: boom".to_string()))
    }
}

#[tokio::test]
async fn test_root_returns_welcome_without_upstreams() {
    let app = create_unreachable_app();

    let response = app.oneshot(empty_request("GET", "/")).await.expect("Failed to make request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "message": WELCOME_MESSAGE }));
}

#[tokio::test]
async fn test_check_item_returns_classification() {
    let store = create_test_store().await;
    let app = create_test_app(LAPTOP_REPLY, store.clone());

    let response = app
        .oneshot(json_request("POST", "/check-item", json!({ "item_name": "Laptop" })))
        .await
        .expect("Failed to make request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "carry_on": true, "checked_bag": true, "description": "x" })
    );

    let history = store.list_recent().await.expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].item_name, "Laptop");
}

#[tokio::test]
async fn test_check_item_malformed_reply_is_500() {
    let app = create_test_app("sure, here's your answer", create_test_store().await);

    let response = app
        .oneshot(json_request("POST", "/check-item", json!({ "item_name": "Laptop" })))
        .await
        .expect("Failed to make request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "detail": "Error: The AI model returned a malformed response." })
    );
}

#[tokio::test]
async fn test_check_item_unreachable_model_is_500_with_cause() {
    let app = create_unreachable_app();

    let response = app
        .oneshot(json_request("POST", "/check-item", json!({ "item_name": "Laptop" })))
        .await
        .expect("Failed to make request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    let detail = body["detail"].as_str().expect("detail is a string");
    assert!(detail.starts_with("An unexpected error occurred: LLM API error"), "{}", detail);
}

#[tokio::test]
async fn test_check_item_survives_store_outage() {
    let app = create_test_app(LAPTOP_REPLY, Arc::new(DownStore));

    let response = app
        .oneshot(json_request("POST", "/check-item", json!({ "item_name": "Laptop" })))
        .await
        .expect("Failed to make request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["carry_on"], true);
}

#[tokio::test]
async fn test_check_item_requires_item_name() {
    let app = create_test_app(LAPTOP_REPLY, create_test_store().await);

    let response = app
        .oneshot(json_request("POST", "/check-item", json!({ "name": "Laptop" })))
        .await
        .expect("Failed to make request");

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_history_lists_newest_first() {
    let store = create_test_store().await;
    for (item, ts) in [
        ("Scissors", "2025-06-07T09:00:00.000Z"),
        ("Laptop", "2025-06-07T08:00:00.000Z"),
        ("Lighter", "2025-06-07T10:00:00.000Z"),
    ] {
        sqlx::query(
            "INSERT INTO tsa_checks (item_name, carry_on, checked_bag, description, created_at) VALUES (?, 1, 1, 'ok', ?)",
        )
        .bind(item)
        .bind(ts)
        .execute(store.pool())
        .await
        .expect("seed insert");
    }
    let app = create_test_app(LAPTOP_REPLY, store);

    let response = app.oneshot(empty_request("GET", "/history")).await.expect("Failed to make request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let names: Vec<&str> = body["history"]
        .as_array()
        .expect("history is an array")
        .iter()
        .map(|r| r["item_name"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["Lighter", "Scissors", "Laptop"]);
    assert_eq!(body["history"][0]["created_at"], "2025-06-07T10:00:00Z");
}

#[tokio::test]
async fn test_history_backend_failure_is_500() {
    let app = create_test_app(LAPTOP_REPLY, Arc::new(DownStore));

    let response = app.oneshot(empty_request("GET", "/history")).await.expect("Failed to make request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "detail": "Failed to fetch history: Supabase API error: 500 Internal Server Error: boom" })
    );
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = create_test_app(LAPTOP_REPLY, create_test_store().await);

    let response = app
        .oneshot(empty_request("GET", "/openapi.json"))
        .await
        .expect("Failed to make request");

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/check-item"]["post"].is_object());
    assert!(doc["paths"]["/history"]["get"].is_object());
}

#[tokio::test]
async fn test_health_probes() {
    let app = create_unreachable_app();

    let response = app.oneshot(empty_request("GET", "/health")).await.expect("Failed to make request");
    assert_eq!(response.status(), StatusCode::OK);
}
