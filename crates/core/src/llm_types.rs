//! LLM accounting types
//!
//! Token usage reported by the answer collaborator and the per-call records
//! kept by the persistence collaborator for monitoring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token usage for one generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

impl TokenUsage {
    /// Build usage, deriving the total from prompt + completion when the
    /// provider did not report it.
    pub fn new(prompt: Option<u32>, completion: Option<u32>, total: Option<u32>) -> Self {
        let total = match (total, prompt, completion) {
            (Some(t), _, _) => Some(t),
            (None, Some(p), Some(c)) => Some(p.saturating_add(c)),
            _ => None,
        };
        Self {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: total,
        }
    }
}

/// Outcome of an LLM call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Ok,
    Error,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Ok => "ok",
            CallStatus::Error => "error",
        }
    }
}

/// One recorded call to the answer collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmCallRecord {
    pub user_id: String,
    pub model: Option<String>,
    pub latency_ms: u64,
    pub usage: TokenUsage,
    pub status: CallStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate statistics over recorded LLM calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmStats {
    pub total_calls: u64,
    pub error_calls: u64,
    pub error_rate: f64,
    pub avg_latency_ms: f64,
    pub avg_total_tokens: f64,
}

impl LlmStats {
    /// Compute statistics from a set of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a LlmCallRecord>) -> Self {
        let mut totals = LlmCallTotals::default();
        for record in records {
            totals.add(record);
        }
        totals.stats()
    }
}

/// Running sums behind [`LlmStats`], so stores need not keep every record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LlmCallTotals {
    calls: u64,
    errors: u64,
    latency_sum_ms: u64,
    token_sum: u64,
    calls_with_tokens: u64,
}

impl LlmCallTotals {
    pub fn add(&mut self, record: &LlmCallRecord) {
        self.calls = self.calls.saturating_add(1);
        if record.status == CallStatus::Error {
            self.errors = self.errors.saturating_add(1);
        }
        self.latency_sum_ms = self.latency_sum_ms.saturating_add(record.latency_ms);
        if let Some(tokens) = record.usage.total_tokens {
            self.token_sum = self.token_sum.saturating_add(u64::from(tokens));
            self.calls_with_tokens = self.calls_with_tokens.saturating_add(1);
        }
    }

    /// Averages over the calls added so far.
    ///
    /// Average tokens only considers calls that reported a total.
    pub fn stats(&self) -> LlmStats {
        if self.calls == 0 {
            return LlmStats::default();
        }

        LlmStats {
            total_calls: self.calls,
            error_calls: self.errors,
            error_rate: self.errors as f64 / self.calls as f64,
            avg_latency_ms: self.latency_sum_ms as f64 / self.calls as f64,
            avg_total_tokens: if self.calls_with_tokens > 0 {
                self.token_sum as f64 / self.calls_with_tokens as f64
            } else {
                0.0
            },
        }
    }
}
