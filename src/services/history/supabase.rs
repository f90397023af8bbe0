use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use super::{ClassificationStore, StoreError};
use crate::models::{ClassificationRecord, NewClassificationRecord};

const SELECT_COLUMNS: &str = "item_name,carry_on,checked_bag,description,created_at";

/// Supabase table accessed through its PostgREST endpoint (`/rest/v1/<table>`)
pub struct SupabaseStore {
    http_client: Client,
    table_url: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(project_url: &str, anon_key: &str, table: &str, timeout_secs: u64) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client for Supabase: {}", e);
                tracing::warn!("Using default HTTP client configuration as fallback");
                Client::default()
            });

        Self {
            http_client,
            table_url: format!("{}/rest/v1/{}", project_url.trim_end_matches('/'), table),
            anon_key: anon_key.to_string(),
        }
    }

    /// Turn a non-2xx PostgREST reply into `StoreError::Api` carrying its body
    async fn check_status(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(StoreError::Api(format!("{}: {}", status, error_text)))
    }
}

#[async_trait]
impl ClassificationStore for SupabaseStore {
    fn name(&self) -> &'static str {
        "supabase"
    }

    async fn insert(&self, record: &NewClassificationRecord) -> Result<(), StoreError> {
        let response = self
            .http_client
            .post(&self.table_url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<ClassificationRecord>, StoreError> {
        let response = self
            .http_client
            .get(&self.table_url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .query(&[("select", SELECT_COLUMNS), ("order", "created_at.desc")])
            .send()
            .await?;

        let records = Self::check_status(response).await?.json().await?;
        Ok(records)
    }
}
