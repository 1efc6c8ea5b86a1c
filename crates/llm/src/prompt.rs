//! Prompt Building
//!
//! Assembles the chat messages sent to the model for a delegated question.

use serde::{Deserialize, Serialize};
use std::fmt;

use sme_advisor_config::prompts;
use sme_advisor_core::{ChatTurn, TurnRole};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TurnRole> for Role {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::User => Role::User,
            TurnRole::Assistant => Role::Assistant,
        }
    }
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl From<&ChatTurn> for Message {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: turn.role.into(),
            content: turn.content.clone(),
        }
    }
}

/// Builds the message list: system prompt, prior turns, then the question.
///
/// ```ignore
/// let messages = PromptBuilder::new()
///     .with_history(&turns)
///     .question("Como calculo mi margen?", "Datos del usuario: sector=retail")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_prompt: String,
    history: Vec<Message>,
    question: Option<Message>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            system_prompt: prompts::SYSTEM_PROMPT.to_string(),
            history: Vec::new(),
            question: None,
        }
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default advisor system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Append prior turns, oldest first
    pub fn with_history(mut self, turns: &[ChatTurn]) -> Self {
        self.history.extend(turns.iter().map(Message::from));
        self
    }

    /// Set the final user turn from the question and its context
    pub fn question(mut self, question: &str, context: &str) -> Self {
        self.question = Some(Message::user(format_question(question, context)));
        self
    }

    pub fn build(self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(Message::system(self.system_prompt));
        messages.extend(self.history);
        messages.extend(self.question);
        messages
    }
}

/// Render the user turn sent with every delegated question
pub fn format_question(question: &str, context: &str) -> String {
    format!("Pregunta: {}\nContexto:\n{}\nRespuesta:", question, context)
}
