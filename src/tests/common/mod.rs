// Common test utilities and helpers

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request};
use std::sync::Arc;

use crate::config::{InferenceConfig, StorageConfig};
use crate::db;
use crate::router::create_router;
use crate::services::{
    ChatMessage, ClassificationService, ClassificationStore, CompletionClient, LLMClient,
    LLMError, SqliteStore, SupabaseStore,
};
use crate::AppState;

/// Completion double that always answers with the same text
pub struct FixedCompletion(pub String);

#[async_trait]
impl CompletionClient for FixedCompletion {
    fn model(&self) -> &str {
        "fixed"
    }

    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LLMError> {
        Ok(self.0.clone())
    }
}

/// Create an in-memory SQLite history store for testing
pub async fn create_test_store() -> Arc<SqliteStore> {
    let pool = db::create_pool("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    Arc::new(SqliteStore::new(pool))
}

/// Router wired to a canned model reply and the given store
pub fn create_test_app(reply: &str, store: Arc<dyn ClassificationStore>) -> Router {
    let completion = Arc::new(FixedCompletion(reply.to_string()));
    let state = AppState {
        classification_service: Arc::new(ClassificationService::new(completion, store)),
    };
    create_router(Arc::new(state))
}

/// Router whose real clients point at a port nobody listens on
pub fn create_unreachable_app() -> Router {
    let inference = InferenceConfig {
        api_base: "http://127.0.0.1:9/v1".to_string(),
        api_key: "sk-unused".to_string(),
        timeout_secs: 2,
        ..InferenceConfig::default()
    };
    let storage = StorageConfig::default();
    let store = SupabaseStore::new("http://127.0.0.1:9", "anon", &storage.table, 2);

    let state = AppState {
        classification_service: Arc::new(ClassificationService::new(
            Arc::new(LLMClient::new(&inference)),
            Arc::new(store),
        )),
    };
    create_router(Arc::new(state))
}

pub fn json_request(method: &str, path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to create test request")
}

pub fn empty_request(method: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("Failed to create test request")
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Response body is not JSON")
}
