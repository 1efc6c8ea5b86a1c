//! Answer generator adapter
//!
//! Bridges an [`LlmBackend`] to the core [`AnswerGenerator`] trait so the
//! advisor can delegate questions without knowing which provider serves them.

use async_trait::async_trait;

use sme_advisor_core::{Answer, AnswerGenerator, AnswerRequest, Result};

use crate::backend::LlmBackend;
use crate::prompt::PromptBuilder;

/// Answers delegated questions with a chat-completions backend.
pub struct LlmAnswerGenerator<B> {
    backend: B,
    system_prompt: Option<String>,
}

impl<B: LlmBackend> LlmAnswerGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            system_prompt: None,
        }
    }

    /// Override the advisor system prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn prompt(&self, request: &AnswerRequest) -> PromptBuilder {
        let builder = match &self.system_prompt {
            Some(prompt) => PromptBuilder::new().system_prompt(prompt.clone()),
            None => PromptBuilder::new(),
        };
        builder
            .with_history(&request.prior_turns)
            .question(&request.question, &request.context)
    }
}

#[async_trait]
impl<B: LlmBackend> AnswerGenerator for LlmAnswerGenerator<B> {
    async fn answer(&self, request: AnswerRequest) -> Result<Answer> {
        let messages = self.prompt(&request).build();

        let result = self.backend.generate(&messages).await?;
        tracing::info!(
            model = self.backend.model_name(),
            latency_ms = result.total_time_ms,
            total_tokens = ?result.usage.total_tokens,
            "LLM answer generated"
        );

        Ok(Answer {
            text: result.text,
            model: result
                .model
                .or_else(|| Some(self.backend.model_name().to_string())),
            usage: result.usage,
        })
    }

    fn model_name(&self) -> &str {
        self.backend.model_name()
    }
}
