//! Default values shared across the configuration sections

/// Language model defaults
pub mod llm {
    /// OpenAI-compatible base URL
    pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    pub const DEFAULT_TEMPERATURE: f32 = 0.6;

    pub const DEFAULT_MAX_TOKENS: usize = 700;

    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Accepted temperature range (inclusive)
    pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;
}

/// HTTP server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    pub const DEFAULT_PORT: u16 = 5000;

    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
}

/// Conversation defaults
pub mod agent {
    /// Exchanges kept in the model memory; twice as many messages are loaded
    pub const DEFAULT_MEMORY_WINDOW: usize = 4;

    pub const MAX_MEMORY_WINDOW: usize = 50;
}

/// Environment variable names read for backwards compatibility
pub mod env {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
    pub const OPENAI_TEMPERATURE: &str = "OPENAI_TEMPERATURE";
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    pub const MEMORY_WINDOW: &str = "MEMORY_WINDOW";
    pub const ENABLE_METRICS: &str = "ENABLE_METRICS";
}
