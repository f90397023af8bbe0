use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Body of `POST /check-item`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ItemRequest {
    /// Free-text item name, forwarded to the model as-is
    pub item_name: String,
}

/// Carry-on / checked bag verdict for a single item, as produced by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemClassification {
    pub carry_on: bool,
    pub checked_bag: bool,
    pub description: String,
}

/// A classification about to be written; `created_at` is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewClassificationRecord {
    pub item_name: String,
    pub carry_on: bool,
    pub checked_bag: bool,
    pub description: String,
}

impl NewClassificationRecord {
    pub fn new(item_name: impl Into<String>, classification: &ItemClassification) -> Self {
        Self {
            item_name: item_name.into(),
            carry_on: classification.carry_on,
            checked_bag: classification.checked_bag,
            description: classification.description.clone(),
        }
    }
}

/// A persisted classification. Records are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassificationRecord {
    pub item_name: String,
    pub carry_on: bool,
    pub checked_bag: bool,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub history: Vec<ClassificationRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Error body returned with every non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}
