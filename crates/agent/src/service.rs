//! Advisor service
//!
//! Binds the router to its collaborators for one user message at a time:
//! loads history, persists both sides of the exchange, applies preference
//! saves, and records every language-model call for monitoring.

use serde::Serialize;
use std::sync::Arc;

use sme_advisor_config::{prompts, AgentConfig};
use sme_advisor_core::{
    AnswerGenerator, ChatTurn, LlmCallLog, LlmStats, MessageStore, PreferenceStore, Result,
    StoredPreference, TurnRole,
};

use crate::router::{ConversationRouter, LlmCallOutcome, Route, RouteKind, RoutedReply};

/// Reply to a single user message
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Empty when the input was ignored
    pub text: String,
    pub route: RouteKind,
    pub llm_call: Option<LlmCallOutcome>,
}

impl Reply {
    fn ignored() -> Self {
        Self {
            text: String::new(),
            route: RouteKind::Ignored,
            llm_call: None,
        }
    }

    fn apology(route: RouteKind) -> Self {
        Self {
            text: prompts::APOLOGY_MESSAGE.to_string(),
            route,
            llm_call: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<RoutedReply> for Reply {
    fn from(routed: RoutedReply) -> Self {
        Self {
            text: routed.text,
            route: routed.kind,
            llm_call: routed.llm_call,
        }
    }
}

/// Preference as exposed to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceView {
    pub key: String,
    pub value: String,
}

impl From<StoredPreference> for PreferenceView {
    fn from(pref: StoredPreference) -> Self {
        Self {
            key: pref.key,
            value: pref.value,
        }
    }
}

/// Conversation entry point used by the HTTP layer
pub struct AdvisorService {
    router: ConversationRouter,
    config: AgentConfig,
    answerer: Arc<dyn AnswerGenerator>,
    preferences: Arc<dyn PreferenceStore>,
    messages: Arc<dyn MessageStore>,
    llm_log: Arc<dyn LlmCallLog>,
}

impl AdvisorService {
    pub fn new(
        config: AgentConfig,
        answerer: Arc<dyn AnswerGenerator>,
        preferences: Arc<dyn PreferenceStore>,
        messages: Arc<dyn MessageStore>,
        llm_log: Arc<dyn LlmCallLog>,
    ) -> Self {
        Self {
            router: ConversationRouter::new(&config),
            config,
            answerer,
            preferences,
            messages,
            llm_log,
        }
    }

    /// Use one store for preferences, messages and call accounting.
    pub fn with_store<S>(config: AgentConfig, answerer: Arc<dyn AnswerGenerator>, store: Arc<S>) -> Self
    where
        S: PreferenceStore + MessageStore + LlmCallLog + 'static,
    {
        Self::new(config, answerer, store.clone(), store.clone(), store)
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Handle one message from `user_id`.
    ///
    /// Store failures are logged and answered with the fixed apology; the
    /// caller never sees a collaborator error.
    pub async fn handle_message(&self, user_id: &str, text: &str) -> Reply {
        let text = text.trim();
        if text.is_empty() {
            return Reply::ignored();
        }

        let route = self.router.decide(text);
        let kind = route.kind();
        tracing::debug!(user_id, route = %kind, "Routed message");

        match self.process(user_id, text, route).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Message handling failed, using apology");
                Reply::apology(kind)
            }
        }
    }

    /// Errors before the user turn is stored bubble up; after that point the
    /// exchange is always completed with an assistant turn.
    async fn process(&self, user_id: &str, text: &str, route: Route) -> Result<Reply> {
        // History is read before this message is stored so it is not duplicated
        let prior_turns = if route == Route::Delegate {
            self.messages
                .recent_messages(user_id, self.config.history_limit())
                .await?
        } else {
            Vec::new()
        };

        self.messages
            .append_message(user_id, TurnRole::User, text)
            .await?;

        let kind = route.kind();
        let reply = match self.respond(user_id, text, route, prior_turns).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Reply failed after user turn was stored, using apology");
                Reply::apology(kind)
            }
        };

        if let Some(call) = &reply.llm_call {
            if let Err(e) = self.llm_log.record_call(call.to_record(user_id)).await {
                tracing::warn!(user_id, error = %e, "Failed to record LLM call");
            }
        }

        if let Err(e) = self
            .messages
            .append_message(user_id, TurnRole::Assistant, &reply.text)
            .await
        {
            tracing::warn!(user_id, error = %e, "Failed to store assistant reply");
        }

        Ok(reply)
    }

    async fn respond(
        &self,
        user_id: &str,
        text: &str,
        route: Route,
        prior_turns: Vec<ChatTurn>,
    ) -> Result<Reply> {
        if let Route::SavePreference(command) = &route {
            self.preferences
                .upsert_preference(user_id, &command.key, &command.value)
                .await?;
            tracing::info!(user_id, key = %command.key, "Saved user preference");
        }

        let preferences = match route {
            Route::ShowPreferences | Route::Delegate => {
                self.preferences.list_preferences(user_id).await?
            }
            _ => Vec::new(),
        };

        Ok(self
            .router
            .resolve(route, text, &preferences, prior_turns, self.answerer.as_ref())
            .await
            .into())
    }

    /// Stored preferences for `user_id`, ordered by key
    pub async fn preferences(&self, user_id: &str) -> Result<Vec<PreferenceView>> {
        let prefs = self.preferences.list_preferences(user_id).await?;
        Ok(prefs.into_iter().map(PreferenceView::from).collect())
    }

    /// The last `limit` messages for `user_id`, oldest first
    pub async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<ChatTurn>> {
        self.messages.recent_messages(user_id, limit).await
    }

    pub async fn llm_stats(&self) -> Result<LlmStats> {
        self.llm_log.stats().await
    }
}
