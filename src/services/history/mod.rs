//! Classification history persistence
//!
//! A record is written once per successful classification and never modified.
//! `created_at` always comes from the backend.

mod sqlite;
mod supabase;

use async_trait::async_trait;

use crate::models::{ClassificationRecord, NewClassificationRecord};

pub use sqlite::SqliteStore;
pub use supabase::SupabaseStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Supabase API error: {0}")]
    Api(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Append-only store of classification records
#[async_trait]
pub trait ClassificationStore: Send + Sync {
    /// Backend name, for logging
    fn name(&self) -> &'static str;

    async fn insert(&self, record: &NewClassificationRecord) -> Result<(), StoreError>;

    /// Every record, most recent `created_at` first
    async fn list_recent(&self) -> Result<Vec<ClassificationRecord>, StoreError>;
}
