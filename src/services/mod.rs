pub mod classification_service;
pub mod history;
pub mod llm;

pub use classification_service::{ClassificationService, ClassifyError};
pub use history::{ClassificationStore, SqliteStore, StoreError, SupabaseStore};
pub use llm::{ChatMessage, CompletionClient, LLMClient, LLMError};
