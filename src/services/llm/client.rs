//! LLM Client - HTTP client for OpenAI-compatible APIs
//!
//! Uses reqwest to call the chat completion endpoint. Compatible with:
//! - OpenRouter
//! - OpenAI
//! - Other OpenAI-compatible APIs

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::models::*;
use crate::config::InferenceConfig;

/// Anything that can turn a chat conversation into completion text
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model identifier, for logging
    fn model(&self) -> &str;

    /// Send the conversation and return the raw text of the first choice
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LLMError>;
}

/// LLM HTTP Client
pub struct LLMClient {
    http_client: Client,
    api_base: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    timeout_secs: u64,
}

impl LLMClient {
    pub fn new(config: &InferenceConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client for inference provider: {}", e);
                tracing::warn!("Using default HTTP client configuration as fallback");
                Client::default()
            });

        Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
        }
    }
}

#[async_trait]
impl CompletionClient for LLMClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LLMError> {
        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        };

        let url = format!("{}/chat/completions", self.api_base);

        tracing::debug!("Calling LLM API: {} with model {}", url, self.model);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LLMError::Timeout(self.timeout_secs)
                } else {
                    LLMError::ApiError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LLMError::ApiError(format!("API error {}: {}", status, error_text)));
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LLMError::ParseError(e.to_string()))?;

        if let Some(usage) = &chat_response.usage {
            tracing::debug!(
                "LLM usage: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LLMError::EmptyResponse)
    }
}
