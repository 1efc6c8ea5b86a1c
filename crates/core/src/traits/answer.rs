//! Answer generation trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{ChatTurn, Result, TokenUsage};

/// Input for a single answer-generation call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// The user's question, verbatim
    pub question: String,
    /// Earlier turns of the conversation, oldest first
    pub prior_turns: Vec<ChatTurn>,
    /// Free-text context (user data, retrieved notes)
    pub context: String,
}

impl AnswerRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn with_prior_turns(mut self, turns: Vec<ChatTurn>) -> Self {
        self.prior_turns = turns;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

/// Generated answer with accounting information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Markdown-flavoured answer text
    pub text: String,
    /// Model that produced the answer, if known
    pub model: Option<String>,
    /// Token usage, if reported
    pub usage: TokenUsage,
}

impl Answer {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Produces free-text answers for questions the core cannot resolve locally.
///
/// Implementations may be slow; callers await a single result and apply
/// their own fallback on error. No retry policy is implied.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn answer(&self, request: AnswerRequest) -> Result<Answer>;

    /// Name of the backing model, for accounting
    fn model_name(&self) -> &str;
}
