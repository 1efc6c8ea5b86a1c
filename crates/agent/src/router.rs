//! Conversation Router
//!
//! Decides, per message, which of the local shortcuts answers it and
//! otherwise hands the question to the answer collaborator. Precedence,
//! first match wins:
//!
//! 1. preference save command
//! 2. "show my data" command
//! 3. courtesy (greeting, farewell, thanks, small talk)
//! 4. `informacion`
//! 5. calculator, when the topic warrants one and it produces a result
//! 6. delegate to the language model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use sme_advisor_config::{prompts, AgentConfig};
use sme_advisor_core::{
    AnswerGenerator, AnswerRequest, CallStatus, ChatTurn, LlmCallRecord, StoredPreference,
    TokenUsage,
};
use sme_advisor_text_processing::{
    classify_conversational, detect_topic, is_show_preferences, normalize_lower,
    parse_save_command, should_use_calculator, ConversationalIntent, PreferenceCommand,
    TopicIntent,
};

use crate::calculators::{run_calculator, CalculatorResult};
use crate::preferences::{build_preference_context, format_preferences};
use crate::replies::{clean_math_delimiters, courtesy_reply, saved_preference_reply};

/// Routing decision for one message
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    SavePreference(PreferenceCommand),
    ShowPreferences,
    Courtesy(ConversationalIntent),
    Info,
    Calculator {
        topic: TopicIntent,
        result: CalculatorResult,
    },
    Delegate,
}

impl Route {
    pub fn kind(&self) -> RouteKind {
        match self {
            Route::SavePreference(_) => RouteKind::SavePreference,
            Route::ShowPreferences => RouteKind::ShowPreferences,
            Route::Courtesy(_) => RouteKind::Courtesy,
            Route::Info => RouteKind::Info,
            Route::Calculator { .. } => RouteKind::Calculator,
            Route::Delegate => RouteKind::Delegate,
        }
    }
}

/// Payload-free tag of the path a reply took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    SavePreference,
    ShowPreferences,
    Courtesy,
    Info,
    Calculator,
    Delegate,
    /// Empty input, nothing was done
    Ignored,
}

impl RouteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::SavePreference => "save_preference",
            RouteKind::ShowPreferences => "show_preferences",
            RouteKind::Courtesy => "courtesy",
            RouteKind::Info => "info",
            RouteKind::Calculator => "calculator",
            RouteKind::Delegate => "delegate",
            RouteKind::Ignored => "ignored",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accounting for one call to the answer collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct LlmCallOutcome {
    pub model: Option<String>,
    pub latency_ms: u64,
    pub usage: TokenUsage,
    /// Set when the call failed and the apology was substituted
    pub error: Option<String>,
}

impl LlmCallOutcome {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn to_record(&self, user_id: &str) -> LlmCallRecord {
        LlmCallRecord {
            user_id: user_id.to_string(),
            model: self.model.clone(),
            latency_ms: self.latency_ms,
            usage: self.usage,
            status: if self.is_error() {
                CallStatus::Error
            } else {
                CallStatus::Ok
            },
            error_message: self.error.clone(),
            created_at: chrono::Utc::now(),
        }
    }
}

/// A resolved reply
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedReply {
    pub text: String,
    pub kind: RouteKind,
    /// Present only when the message was delegated
    pub llm_call: Option<LlmCallOutcome>,
}

/// Stateless message router
#[derive(Debug, Clone)]
pub struct ConversationRouter {
    calculators_enabled: bool,
}

impl Default for ConversationRouter {
    fn default() -> Self {
        Self {
            calculators_enabled: true,
        }
    }
}

impl ConversationRouter {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            calculators_enabled: config.calculators_enabled,
        }
    }

    /// Classify `text` without side effects.
    pub fn decide(&self, text: &str) -> Route {
        if let Some(command) = parse_save_command(text) {
            return Route::SavePreference(command);
        }

        if is_show_preferences(text) {
            return Route::ShowPreferences;
        }

        let intent = classify_conversational(text);
        if intent.is_courtesy() {
            return Route::Courtesy(intent);
        }

        if normalize_lower(text).trim() == prompts::INFO_TRIGGER {
            return Route::Info;
        }

        if self.calculators_enabled {
            let topic = detect_topic(text);
            if should_use_calculator(text, topic) {
                if let Some(result) = run_calculator(topic, text) {
                    return Route::Calculator { topic, result };
                }
            }
        }

        Route::Delegate
    }

    /// Decide and resolve in one step.
    pub async fn route(
        &self,
        text: &str,
        preferences: &[StoredPreference],
        prior_turns: Vec<ChatTurn>,
        answerer: &dyn AnswerGenerator,
    ) -> RoutedReply {
        let route = self.decide(text);
        self.resolve(route, text, preferences, prior_turns, answerer).await
    }

    /// Produce the reply text for an already decided route.
    ///
    /// Never fails: an answer-collaborator error becomes the fixed apology
    /// and is reported in [`RoutedReply::llm_call`].
    pub async fn resolve(
        &self,
        route: Route,
        text: &str,
        preferences: &[StoredPreference],
        prior_turns: Vec<ChatTurn>,
        answerer: &dyn AnswerGenerator,
    ) -> RoutedReply {
        let kind = route.kind();
        tracing::debug!(route = %kind, "Resolving route");

        let (raw, llm_call) = match route {
            Route::SavePreference(command) => {
                (saved_preference_reply(&command.key, &command.value), None)
            }
            Route::ShowPreferences => (format_preferences(preferences), None),
            Route::Courtesy(intent) => (
                courtesy_reply(intent).unwrap_or(prompts::GREETING_REPLY).to_string(),
                None,
            ),
            Route::Info => (prompts::INFO_MESSAGE.to_string(), None),
            Route::Calculator { topic, result } => {
                tracing::debug!(topic = %topic, kind = ?result.kind(), "Answered by calculator");
                (result.into_text(), None)
            }
            Route::Delegate => {
                let (text, outcome) = self.delegate(text, preferences, prior_turns, answerer).await;
                (text, Some(outcome))
            }
        };

        RoutedReply {
            text: clean_math_delimiters(&raw),
            kind,
            llm_call,
        }
    }

    async fn delegate(
        &self,
        text: &str,
        preferences: &[StoredPreference],
        prior_turns: Vec<ChatTurn>,
        answerer: &dyn AnswerGenerator,
    ) -> (String, LlmCallOutcome) {
        let request = AnswerRequest::new(text)
            .with_prior_turns(prior_turns)
            .with_context(build_preference_context(preferences));

        let start = Instant::now();
        let result = answerer.answer(request).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(answer) => {
                tracing::info!(
                    latency_ms,
                    total_tokens = ?answer.usage.total_tokens,
                    "Answer generated"
                );
                let outcome = LlmCallOutcome {
                    model: answer
                        .model
                        .clone()
                        .or_else(|| Some(answerer.model_name().to_string())),
                    latency_ms,
                    usage: answer.usage,
                    error: None,
                };
                (answer.text, outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, latency_ms, "Answer generation failed, using apology");
                let outcome = LlmCallOutcome {
                    model: Some(answerer.model_name().to_string()),
                    latency_ms,
                    usage: TokenUsage::default(),
                    error: Some(e.to_string()),
                };
                (prompts::APOLOGY_MESSAGE.to_string(), outcome)
            }
        }
    }
}
