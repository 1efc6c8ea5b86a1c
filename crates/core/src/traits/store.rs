//! Persistence collaborator traits
//!
//! All operations are scoped to a single user identifier. Implementations
//! must not leak data across users; preference upserts are last-write-wins.

use async_trait::async_trait;

use crate::{ChatTurn, LlmCallRecord, LlmStats, Result, StoredPreference, TurnRole};

/// Stores user preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// All preferences for a user, ordered by key
    async fn list_preferences(&self, user_id: &str) -> Result<Vec<StoredPreference>>;

    /// Insert or overwrite the value stored under `key`
    async fn upsert_preference(&self, user_id: &str, key: &str, value: &str) -> Result<()>;
}

/// Stores the conversation log
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message to the user's log
    async fn append_message(&self, user_id: &str, role: TurnRole, content: &str) -> Result<()>;

    /// The last `limit` messages, oldest first. `limit == 0` yields nothing.
    async fn recent_messages(&self, user_id: &str, limit: usize) -> Result<Vec<ChatTurn>>;
}

/// Records answer-generation calls for monitoring
#[async_trait]
pub trait LlmCallLog: Send + Sync {
    async fn record_call(&self, record: LlmCallRecord) -> Result<()>;

    async fn stats(&self) -> Result<LlmStats>;
}
