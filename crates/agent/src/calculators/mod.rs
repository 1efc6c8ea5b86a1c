//! Deterministic financial calculators
//!
//! Each calculator reads the amounts it needs straight from the message
//! text and either answers, asks for what is missing, or returns `None` so
//! the question falls through to the language model.
//!
//! | Topic       | Needs                                            | `None` when            |
//! |-------------|--------------------------------------------------|------------------------|
//! | break-even  | fixed costs + (price & variable cost, or margin %) | never                |
//! | cash flow   | sales + expenses                                 | either is missing      |
//! | margins     | sales + (cost of sales or net income)            | no margin computable   |
//! | liquidity   | current assets + current liabilities             | either is missing      |
//! | debt        | EBITDA (or operating income) + debt or interest  | no ratio computable    |

pub mod break_even;
pub mod cashflow;
pub mod debt;
pub mod liquidity;
pub mod margins;

use serde::{Deserialize, Serialize};
use sme_advisor_text_processing::TopicIntent;

/// What kind of answer a calculator produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// One or more metrics were computed
    Computed,
    /// Itemized request for the inputs that are missing
    MissingData,
    /// Inputs were present but cannot produce a meaningful result
    Invalid,
}

/// Formatted calculator reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorResult {
    kind: ResultKind,
    text: String,
}

impl CalculatorResult {
    pub fn computed(text: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Computed,
            text: text.into(),
        }
    }

    pub fn missing_data(text: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::MissingData,
            text: text.into(),
        }
    }

    pub fn invalid(text: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Invalid,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Run the calculator for `topic` over `text`.
pub fn run_calculator(topic: TopicIntent, text: &str) -> Option<CalculatorResult> {
    let result = match topic {
        TopicIntent::BreakEven => Some(break_even::calculate(text)),
        TopicIntent::Cashflow => cashflow::calculate(text),
        TopicIntent::Margins => margins::calculate(text),
        TopicIntent::Liquidity => liquidity::calculate(text),
        TopicIntent::Debt => debt::calculate(text),
        TopicIntent::General => None,
    };

    tracing::debug!(
        topic = %topic,
        outcome = ?result.as_ref().map(CalculatorResult::kind),
        "Calculator evaluated"
    );
    result
}

/// Assemble the common reply layout: intro, metric lines, risk note, closing.
pub(crate) fn render(intro: &str, lines: &[String], note: &str, closing: &str) -> String {
    format!("{}\n\n{}\n\n- {}\n\n{}", intro, lines.join("\n"), note, closing)
}
