//! Persistence layer for the SME advisor
//!
//! Provides storage for:
//! - User preferences (unique per user and key, last write wins)
//! - Conversation messages (ordered, bounded per user)
//! - LLM call records and aggregate statistics

pub mod memory;

pub use memory::{InMemoryStore, DEFAULT_MESSAGE_LIMIT};

use std::sync::Arc;

/// Initialize the persistence layer
///
/// A single shared store backs every trait; hand clones of the `Arc` to
/// each consumer.
pub fn init(message_limit: Option<usize>) -> Arc<InMemoryStore> {
    let limit = message_limit.unwrap_or(DEFAULT_MESSAGE_LIMIT);
    tracing::info!(message_limit = limit, "Initialized in-memory store");
    Arc::new(InMemoryStore::with_message_limit(limit))
}
