//! Conversation agent configuration

use serde::{Deserialize, Serialize};

use crate::constants::{agent, env};

/// Settings that shape how the advisor handles each message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Exchanges of history given to the language model
    #[serde(default = "default_memory_window")]
    pub memory_window: usize,

    /// Short-circuit financial questions to the local calculators
    #[serde(default = "default_true")]
    pub calculators_enabled: bool,
}

fn default_memory_window() -> usize {
    std::env::var(env::MEMORY_WINDOW)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(agent::DEFAULT_MEMORY_WINDOW)
}

fn default_true() -> bool {
    true
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            memory_window: default_memory_window(),
            calculators_enabled: true,
        }
    }
}

impl AgentConfig {
    /// Number of stored messages to load as prior turns
    pub fn history_limit(&self) -> usize {
        self.memory_window * 2
    }
}
