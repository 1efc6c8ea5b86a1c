//! SME Financial Advisor Agent
//!
//! Features:
//! - Deterministic calculators (break-even, cash flow, margins, liquidity, debt)
//! - Courtesy and information shortcuts
//! - Preference save/show commands
//! - Conversation routing with language-model fallback
//! - `AdvisorService` tying the router to persistence and answer collaborators

pub mod calculators;
pub mod preferences;
pub mod replies;
pub mod router;
pub mod service;

pub use calculators::{run_calculator, CalculatorResult, ResultKind};
pub use preferences::{build_preference_context, format_preferences};
pub use replies::{clean_math_delimiters, courtesy_reply};
pub use router::{ConversationRouter, LlmCallOutcome, Route, RouteKind, RoutedReply};
pub use service::{AdvisorService, PreferenceView, Reply};

// Re-export the classification layer for callers that only depend on the agent
pub mod intent {
    pub use sme_advisor_text_processing::intent::*;
}
