//! Collaborator traits for the advisor core
//!
//! The deterministic core (classification, extraction, calculators) is
//! string-in/string-out. Everything slow or stateful sits behind these
//! traits so the core can be exercised without a network or database:
//!
//! ```text
//! Answer generation:
//!   - AnswerGenerator: (question, prior turns, context) -> answer text
//!
//! Persistence:
//!   - PreferenceStore: list / upsert user preferences
//!   - MessageStore: append / read recent conversation messages
//!   - LlmCallLog: record answer-generation calls and aggregate stats
//! ```

mod answer;
mod store;

pub use answer::{Answer, AnswerGenerator, AnswerRequest};
pub use store::{LlmCallLog, MessageStore, PreferenceStore};
