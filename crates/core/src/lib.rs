//! Core traits and types for the SME financial advisor
//!
//! This crate provides foundational types used across all other crates:
//! - Conversation turns and roles
//! - Stored user preferences
//! - LLM usage and call accounting types
//! - Collaborator traits (answer generation, preference and message stores)
//! - Error types

pub mod conversation;
pub mod error;
pub mod llm_types;
pub mod preferences;
pub mod traits;

pub use conversation::{ChatTurn, TurnRole};
pub use error::{Error, Result};
pub use llm_types::{CallStatus, LlmCallRecord, LlmCallTotals, LlmStats, TokenUsage};
pub use preferences::StoredPreference;

pub use traits::{Answer, AnswerGenerator, AnswerRequest, LlmCallLog, MessageStore, PreferenceStore};
