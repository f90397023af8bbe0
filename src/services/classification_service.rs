//! Item classification orchestration
//!
//! One request = one completion call followed by one best-effort insert.

use std::sync::Arc;

use crate::models::{ClassificationRecord, ItemClassification, NewClassificationRecord};
use crate::services::history::{ClassificationStore, StoreError};
use crate::services::llm::scenarios::tsa_check::{self, DecodeError};
use crate::services::llm::{CompletionClient, LLMError};

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// The model answered with something that is not JSON
    #[error("The AI model returned a malformed response")]
    MalformedResponse,

    /// Transport, upstream status, or a JSON answer of the wrong shape
    #[error("{0}")]
    Unexpected(String),

    #[error("{0}")]
    History(StoreError),
}

impl From<LLMError> for ClassifyError {
    fn from(err: LLMError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl From<DecodeError> for ClassifyError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Malformed(_) => Self::MalformedResponse,
            DecodeError::Shape(e) => Self::Unexpected(e.to_string()),
        }
    }
}

pub struct ClassificationService {
    completion: Arc<dyn CompletionClient>,
    store: Arc<dyn ClassificationStore>,
}

impl ClassificationService {
    pub fn new(completion: Arc<dyn CompletionClient>, store: Arc<dyn ClassificationStore>) -> Self {
        Self { completion, store }
    }

    /// Ask the model about `item_name` and log the verdict.
    ///
    /// A failed insert never fails the call: the verdict is returned either way.
    pub async fn classify(&self, item_name: &str) -> Result<ItemClassification, ClassifyError> {
        let messages = tsa_check::build_messages(item_name);

        tracing::debug!("Classifying '{}' with model {}", item_name, self.completion.model());
        let content = self.completion.complete(&messages).await?;

        let classification = tsa_check::parse_classification(&content).inspect_err(|e| {
            tracing::warn!("Model output for '{}' rejected: {}. Content: {}", item_name, e, content);
        })?;

        let record = NewClassificationRecord::new(item_name, &classification);
        let persisted: Result<(), StoreError> = self.store.insert(&record).await;
        match persisted {
            Ok(()) => tracing::info!(
                "Successfully stored TSA check for '{}' in {}",
                item_name,
                self.store.name()
            ),
            Err(e) => tracing::warn!("Failed to store in {}: {}", self.store.name(), e),
        }

        Ok(classification)
    }

    /// All stored classifications, newest first
    pub async fn list_history(&self) -> Result<Vec<ClassificationRecord>, ClassifyError> {
        self.store.list_recent().await.map_err(ClassifyError::History)
    }
}
