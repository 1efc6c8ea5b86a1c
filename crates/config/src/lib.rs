//! Configuration management for the SME financial advisor
//!
//! Supports loading configuration from:
//! - TOML/YAML/JSON files under `config/`
//! - Environment variables (`SME_ADVISOR__` prefix, `__` separator)
//! - The conventional `OPENAI_*` variables for the language model
//!
//! The static Spanish message catalogue (system prompt, courtesy replies,
//! welcome messages) lives in [`prompts`].

pub mod agent;
pub mod constants;
pub mod prompts;
pub mod settings;

pub use agent::AgentConfig;
pub use settings::{
    load_settings, load_settings_from, LlmSettings, ObservabilityConfig, RuntimeEnvironment,
    ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
