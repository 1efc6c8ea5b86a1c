//! Intent Detection
//!
//! Two independent classifiers run over normalized Spanish text:
//!
//! - [`classify_conversational`] recognizes courtesy messages (greeting,
//!   farewell, thanks, small talk) that get a canned reply.
//! - [`detect_topic`] maps a financial question to the calculator able to
//!   answer it; [`should_use_calculator`] decides whether to try it.
//!
//! Both evaluate an ordered rule list and stop at the first match.
//!
//! # Example
//!
//! ```
//! use sme_advisor_text_processing::intent::{classify_conversational, detect_topic, ConversationalIntent, TopicIntent};
//!
//! assert_eq!(classify_conversational("Hola, buen día"), ConversationalIntent::Greeting);
//! assert_eq!(detect_topic("¿Cuál es mi punto de equilibrio?"), TopicIntent::BreakEven);
//! ```

mod conversational;
mod topic;

pub use conversational::classify_conversational;
pub use topic::{detect_topic, should_use_calculator};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Courtesy category of a whole message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationalIntent {
    Greeting,
    Farewell,
    Thanks,
    Smalltalk,
    /// Anything that is not courtesy
    Query,
}

impl ConversationalIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Farewell => "farewell",
            Self::Thanks => "thanks",
            Self::Smalltalk => "smalltalk",
            Self::Query => "query",
        }
    }

    pub fn is_courtesy(&self) -> bool {
        !matches!(self, Self::Query)
    }
}

impl fmt::Display for ConversationalIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Financial topic of a question, one per calculator plus `General`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicIntent {
    BreakEven,
    Cashflow,
    Margins,
    Liquidity,
    Debt,
    General,
}

impl TopicIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BreakEven => "break_even",
            Self::Cashflow => "cashflow",
            Self::Margins => "margins",
            Self::Liquidity => "liquidity",
            Self::Debt => "debt",
            Self::General => "general",
        }
    }
}

impl fmt::Display for TopicIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_names() {
        assert_eq!(ConversationalIntent::Smalltalk.as_str(), "smalltalk");
        assert_eq!(TopicIntent::BreakEven.to_string(), "break_even");
        assert!(ConversationalIntent::Thanks.is_courtesy());
        assert!(!ConversationalIntent::Query.is_courtesy());
    }
}
