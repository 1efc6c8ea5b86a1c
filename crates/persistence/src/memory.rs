//! In-memory stores
//!
//! Backed by `parking_lot::RwLock`ed maps; contents are lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, VecDeque};

use sme_advisor_core::{
    ChatTurn, LlmCallLog, LlmCallRecord, LlmCallTotals, LlmStats, MessageStore, PreferenceStore,
    Result, StoredPreference, TurnRole,
};

/// Messages kept per user unless configured otherwise
pub const DEFAULT_MESSAGE_LIMIT: usize = 1_000;

/// Single store implementing every persistence trait
#[derive(Debug)]
pub struct InMemoryStore {
    /// user_id -> key -> preference (BTreeMap keeps keys ordered)
    preferences: RwLock<HashMap<String, BTreeMap<String, StoredPreference>>>,
    messages: RwLock<HashMap<String, VecDeque<ChatTurn>>>,
    /// Running sums only; individual call records are not retained
    llm_calls: RwLock<LlmCallTotals>,
    message_limit: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_message_limit(DEFAULT_MESSAGE_LIMIT)
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` messages per user, dropping the oldest.
    pub fn with_message_limit(limit: usize) -> Self {
        Self {
            preferences: RwLock::new(HashMap::new()),
            messages: RwLock::new(HashMap::new()),
            llm_calls: RwLock::new(LlmCallTotals::default()),
            message_limit: limit.max(1),
        }
    }
}

#[async_trait]
impl PreferenceStore for InMemoryStore {
    async fn list_preferences(&self, user_id: &str) -> Result<Vec<StoredPreference>> {
        Ok(self
            .preferences
            .read()
            .get(user_id)
            .map(|prefs| prefs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn upsert_preference(&self, user_id: &str, key: &str, value: &str) -> Result<()> {
        let mut preferences = self.preferences.write();
        let user_prefs = preferences.entry(user_id.to_string()).or_default();

        match user_prefs.get_mut(key) {
            Some(existing) => {
                existing.value = value.to_string();
                existing.updated_at = Utc::now();
            }
            None => {
                user_prefs.insert(key.to_string(), StoredPreference::new(user_id, key, value));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn append_message(&self, user_id: &str, role: TurnRole, content: &str) -> Result<()> {
        let mut messages = self.messages.write();
        let log = messages.entry(user_id.to_string()).or_default();
        log.push_back(ChatTurn::new(role, content));
        while log.len() > self.message_limit {
            log.pop_front();
        }
        Ok(())
    }

    async fn recent_messages(&self, user_id: &str, limit: usize) -> Result<Vec<ChatTurn>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let messages = self.messages.read();
        let Some(log) = messages.get(user_id) else {
            return Ok(Vec::new());
        };

        let skip = log.len().saturating_sub(limit);
        Ok(log.iter().skip(skip).cloned().collect())
    }
}

#[async_trait]
impl LlmCallLog for InMemoryStore {
    async fn record_call(&self, record: LlmCallRecord) -> Result<()> {
        tracing::trace!(
            user_id = %record.user_id,
            status = record.status.as_str(),
            latency_ms = record.latency_ms,
            "Recorded LLM call"
        );
        self.llm_calls.write().add(&record);
        Ok(())
    }

    async fn stats(&self) -> Result<LlmStats> {
        Ok(self.llm_calls.read().stats())
    }
}
