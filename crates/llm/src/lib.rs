//! Language model integration for the SME advisor
//!
//! Features:
//! - OpenAI-compatible chat-completions backend
//! - Prompt assembly (system prompt, prior turns, question + context)
//! - `LlmAnswerGenerator`, bridging any backend to the core `AnswerGenerator`

pub mod adapter;
pub mod backend;
pub mod prompt;

pub use adapter::LlmAnswerGenerator;
pub use backend::{GenerationResult, LlmBackend, OpenAIBackend, OpenAIConfig};
pub use prompt::{Message, PromptBuilder, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for sme_advisor_core::Error {
    fn from(err: LlmError) -> Self {
        sme_advisor_core::Error::Llm(err.to_string())
    }
}
