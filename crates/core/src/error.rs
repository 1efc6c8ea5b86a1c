//! Error types shared by every crate in the workspace

use thiserror::Error;

/// Result alias using the core [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by collaborators of the advisor core.
///
/// Parse misses are never represented here; they are `None` values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
