//! TSA Item Checker Library
//!
//! Carry-on / checked bag classification backed by a chat-completion model,
//! with every verdict logged to a history store.

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use services::{
    ClassificationService, ClassificationStore, ClassifyError, CompletionClient, LLMClient,
    SqliteStore, SupabaseStore,
};

/// Application shared state
///
/// Both upstream clients live inside the service and are injected at startup,
/// so tests can swap either one for a double.
#[derive(Clone)]
pub struct AppState {
    pub classification_service: Arc<ClassificationService>,
}

#[cfg(test)]
mod tests;
