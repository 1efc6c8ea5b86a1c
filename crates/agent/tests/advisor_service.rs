//! End-to-end message handling against the in-memory store

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use sme_advisor_agent::{AdvisorService, RouteKind};
use sme_advisor_config::{prompts, AgentConfig};
use sme_advisor_core::{
    Answer, AnswerGenerator, AnswerRequest, CallStatus, ChatTurn, Error, MessageStore,
    PreferenceStore, Result, StoredPreference, TokenUsage, TurnRole,
};
use sme_advisor_persistence::InMemoryStore;

/// Replies from a script and remembers every request it saw
struct ScriptedAnswerer {
    replies: Mutex<Vec<Result<String>>>,
    requests: Mutex<Vec<AnswerRequest>>,
}

impl ScriptedAnswerer {
    fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<AnswerRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl AnswerGenerator for ScriptedAnswerer {
    async fn answer(&self, request: AnswerRequest) -> Result<Answer> {
        self.requests.lock().push(request);
        let next = {
            let mut replies = self.replies.lock();
            if replies.is_empty() {
                Err(Error::Llm("script exhausted".to_string()))
            } else {
                replies.remove(0)
            }
        };
        next.map(|text| Answer {
            text,
            model: Some("scripted-model".to_string()),
            usage: TokenUsage::new(Some(40), Some(10), None),
        })
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Store whose preference reads always fail
struct BrokenPreferences;

#[async_trait]
impl PreferenceStore for BrokenPreferences {
    async fn list_preferences(&self, _user_id: &str) -> Result<Vec<StoredPreference>> {
        Err(Error::Persistence("connection refused".to_string()))
    }

    async fn upsert_preference(&self, _user_id: &str, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Persistence("connection refused".to_string()))
    }
}

fn config(memory_window: usize) -> AgentConfig {
    AgentConfig {
        memory_window,
        calculators_enabled: true,
    }
}

fn service(answerer: Arc<ScriptedAnswerer>, store: Arc<InMemoryStore>) -> AdvisorService {
    AdvisorService::with_store(config(1), answerer, store)
}

#[tokio::test]
async fn test_empty_message_is_ignored() {
    let store = Arc::new(InMemoryStore::new());
    let svc = service(ScriptedAnswerer::new(vec![]), store.clone());

    let reply = svc.handle_message("u1", "   ").await;
    assert!(reply.is_empty());
    assert_eq!(reply.route, RouteKind::Ignored);
    assert!(store.recent_messages("u1", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_then_show_preferences() {
    let store = Arc::new(InMemoryStore::new());
    let answerer = ScriptedAnswerer::new(vec![]);
    let svc = service(answerer.clone(), store.clone());

    let reply = svc.handle_message("u1", "guardar: sector=Retail").await;
    assert_eq!(reply.route, RouteKind::SavePreference);
    assert_eq!(
        reply.text,
        "Listo. Guarde sector = Retail. Si quieres verlos, escribe: mis datos."
    );

    let reply = svc.handle_message("u1", "recordar ciudad: Bogotá").await;
    assert_eq!(reply.route, RouteKind::SavePreference);

    let reply = svc.handle_message("u1", "mis datos").await;
    assert_eq!(reply.route, RouteKind::ShowPreferences);
    assert!(reply.text.contains("- ciudad: Bogotá\n- sector: Retail"));

    let prefs = svc.preferences("u1").await.unwrap();
    assert_eq!(prefs.len(), 2);
    assert!(answerer.requests().is_empty());
}

#[tokio::test]
async fn test_courtesy_info_and_calculator_are_local() {
    let store = Arc::new(InMemoryStore::new());
    let answerer = ScriptedAnswerer::new(vec![]);
    let svc = service(answerer.clone(), store.clone());

    let reply = svc.handle_message("u1", "Hola!").await;
    assert_eq!(reply.route, RouteKind::Courtesy);
    assert_eq!(reply.text, prompts::GREETING_REPLY);

    let reply = svc.handle_message("u1", "Información").await;
    assert_eq!(reply.route, RouteKind::Info);
    assert_eq!(reply.text, prompts::INFO_MESSAGE);

    let reply = svc
        .handle_message("u1", "Calcula el flujo de caja: ingresos 2000000 gastos 1500000")
        .await;
    assert_eq!(reply.route, RouteKind::Calculator);
    assert!(reply.text.contains("- Neto: $500,000"));

    assert!(answerer.requests().is_empty());
    assert_eq!(svc.llm_stats().await.unwrap().total_calls, 0);

    // Both sides of each exchange are logged
    let history = svc.history("u1", 10).await.unwrap();
    assert_eq!(history.len(), 6);
    assert_eq!(history[0], ChatTurn::user("Hola!"));
    assert_eq!(history[1].role, TurnRole::Assistant);
}

#[tokio::test]
async fn test_delegation_uses_history_window_and_context() {
    let store = Arc::new(InMemoryStore::new());
    let answerer = ScriptedAnswerer::new(vec![
        Ok("Primera respuesta".to_string()),
        Ok("Usa \\(leasing\\) para equipos".to_string()),
    ]);
    let svc = service(answerer.clone(), store.clone());

    svc.handle_message("u1", "guardar: sector=alimentos").await;

    let first = svc.handle_message("u1", "Que impuestos debo pagar").await;
    assert_eq!(first.route, RouteKind::Delegate);
    assert_eq!(first.text, "Primera respuesta");

    let second = svc.handle_message("u1", "Cuales son los mejores creditos").await;
    assert_eq!(second.text, "Usa (leasing) para equipos");

    let requests = answerer.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].question, "Cuales son los mejores creditos");
    assert_eq!(requests[1].context, "Datos del usuario: sector=alimentos");
    // memory_window = 1 exchange -> two prior messages, excluding the current one
    assert_eq!(
        requests[1].prior_turns,
        vec![
            ChatTurn::user("Que impuestos debo pagar"),
            ChatTurn::assistant("Primera respuesta"),
        ]
    );

    let stats = svc.llm_stats().await.unwrap();
    assert_eq!(stats.total_calls, 2);
    assert_eq!(stats.error_calls, 0);
    assert!((stats.avg_total_tokens - 50.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_answer_failure_yields_apology_and_error_record() {
    let store = Arc::new(InMemoryStore::new());
    let answerer = ScriptedAnswerer::new(vec![Err(Error::Llm("HTTP 429: rate limited".to_string()))]);
    let svc = service(answerer, store.clone());

    let reply = svc.handle_message("u1", "Que me recomiendas para mis finanzas").await;
    assert_eq!(reply.route, RouteKind::Delegate);
    assert_eq!(reply.text, prompts::APOLOGY_MESSAGE);

    let call = reply.llm_call.unwrap();
    assert_eq!(call.to_record("u1").status, CallStatus::Error);

    let stats = svc.llm_stats().await.unwrap();
    assert_eq!(stats.total_calls, 1);
    assert_eq!(stats.error_calls, 1);

    // The apology is what gets stored as the assistant turn
    let history = svc.history("u1", 1).await.unwrap();
    assert_eq!(history[0], ChatTurn::assistant(prompts::APOLOGY_MESSAGE));
}

#[tokio::test]
async fn test_store_failure_yields_apology() {
    let store = Arc::new(InMemoryStore::new());
    let answerer = ScriptedAnswerer::new(vec![Ok("no deberia llegar".to_string())]);
    let svc = AdvisorService::new(
        config(4),
        answerer.clone(),
        Arc::new(BrokenPreferences),
        store.clone(),
        store.clone(),
    );

    let reply = svc.handle_message("u1", "guardar: sector=retail").await;
    assert_eq!(reply.route, RouteKind::SavePreference);
    assert_eq!(reply.text, prompts::APOLOGY_MESSAGE);

    // The user turn is answered in the log even though the save failed
    assert_eq!(
        store.recent_messages("u1", 10).await.unwrap(),
        vec![
            ChatTurn::user("guardar: sector=retail"),
            ChatTurn::assistant(prompts::APOLOGY_MESSAGE),
        ]
    );

    let reply = svc.handle_message("u1", "Que impuestos debo pagar").await;
    assert_eq!(reply.text, prompts::APOLOGY_MESSAGE);
    assert!(answerer.requests().is_empty());
}

#[tokio::test]
async fn test_users_do_not_share_preferences() {
    let store = Arc::new(InMemoryStore::new());
    let svc = service(ScriptedAnswerer::new(vec![]), store);

    svc.handle_message("u1", "guardar: ciudad=Cali").await;
    let reply = svc.handle_message("u2", "ver datos").await;
    assert!(reply.text.starts_with("No tengo datos guardados."));
}
