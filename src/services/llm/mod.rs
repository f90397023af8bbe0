//! LLM Service Module
//!
//! Chat-completion access for the item checker.
//!
//! # Architecture
//! ```text
//! ┌──────────────────────┐
//! │  CompletionClient    │  ← Trait (injected into ClassificationService)
//! └──────────┬───────────┘
//!            │
//!      ┌─────┴─────┐
//!      ▼           ▼
//! ┌─────────┐  ┌──────────┐
//! │LLMClient│  │ Test     │
//! │ (OpenAI)│  │ doubles  │
//! └─────────┘  └──────────┘
//! ```

mod client;
mod models;
pub mod scenarios;

pub use client::{CompletionClient, LLMClient};
pub use models::{ChatMessage, LLMError};
