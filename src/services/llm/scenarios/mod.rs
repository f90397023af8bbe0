//! LLM Prompt Scenarios
//!
//! Each scenario owns its system prompt and builds the conversation sent to the model.

pub mod tsa_check;
