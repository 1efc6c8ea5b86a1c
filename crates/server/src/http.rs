//! HTTP Endpoints
//!
//! JSON API for the advisor.

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use sme_advisor_agent::{PreferenceView, RouteKind};
use sme_advisor_config::prompts;
use sme_advisor_core::{ChatTurn, LlmStats};

use crate::metrics::{metrics_handler, record_llm_call, record_message};
use crate::state::AppState;
use crate::ServerError;

/// History entries returned when the client does not ask for a limit
const DEFAULT_HISTORY_LIMIT: usize = 50;
const MAX_HISTORY_LIMIT: usize = 500;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.config.server.cors_origins,
        state.config.server.cors_enabled,
    );
    let timeout = Duration::from_secs(state.config.server.timeout_seconds);

    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/chat", post(chat))
        .route("/api/users/:user_id/preferences", get(get_preferences))
        .route("/api/users/:user_id/history", get(get_history))
        .route("/api/info", get(info))
        .route("/api/stats", get(llm_stats))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If no configured origin parses, defaults to localhost:3000
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to localhost:3000");
        return layer.allow_origin(HeaderValue::from_static("http://localhost:3000"));
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    layer.allow_origin(parsed_origins)
}

fn new_user_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// New chat session: an anonymous user id plus the opening messages
#[derive(Debug, Serialize, Deserialize)]
struct SessionResponse {
    user_id: String,
    welcome_messages: Vec<String>,
    quick_replies: Vec<String>,
}

async fn create_session() -> (StatusCode, Json<SessionResponse>) {
    let user_id = new_user_id();
    tracing::debug!(user_id = %user_id, "Created session");

    (
        StatusCode::CREATED,
        Json(SessionResponse {
            user_id,
            welcome_messages: prompts::WELCOME_MESSAGES.iter().map(|m| m.to_string()).collect(),
            quick_replies: prompts::QUICK_REPLIES.iter().map(|m| m.to_string()).collect(),
        }),
    )
}

/// Chat request
#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    user_id: Option<String>,
    message: String,
}

/// Chat response
#[derive(Debug, Serialize, Deserialize)]
struct ChatResponse {
    user_id: String,
    reply: String,
    route: RouteKind,
}

/// Chat endpoint
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ServerError::InvalidRequest("message must not be empty".to_string()));
    }

    let user_id = request
        .user_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(new_user_id);

    let reply = state.advisor.handle_message(&user_id, message).await;
    record_message(reply.route);
    if let Some(call) = &reply.llm_call {
        record_llm_call(call);
    }

    Ok(Json(ChatResponse {
        user_id,
        reply: reply.text,
        route: reply.route,
    }))
}

async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<PreferenceView>>, ServerError> {
    Ok(Json(state.advisor.preferences(&user_id).await?))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

async fn get_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ChatTurn>>, ServerError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(MAX_HISTORY_LIMIT);
    Ok(Json(state.advisor.history(&user_id, limit).await?))
}

async fn info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "title": prompts::TITLE,
        "subtitle": prompts::SUBTITLE,
        "info": prompts::INFO_MESSAGE,
        "quick_replies": prompts::QUICK_REPLIES,
    }))
}

/// LLM call statistics, hidden unless metrics are enabled
async fn llm_stats(State(state): State<AppState>) -> Result<Json<LlmStats>, ServerError> {
    if !state.metrics_enabled() {
        return Err(ServerError::NotFound("stats are disabled".to_string()));
    }
    Ok(Json(state.advisor.llm_stats().await?))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    use sme_advisor_agent::AdvisorService;
    use sme_advisor_config::Settings;
    use sme_advisor_core::{Answer, AnswerGenerator, AnswerRequest, Result};
    use sme_advisor_persistence::InMemoryStore;

    struct CannedAnswerer;

    #[async_trait]
    impl AnswerGenerator for CannedAnswerer {
        async fn answer(&self, _request: AnswerRequest) -> Result<Answer> {
            Ok(Answer::text("Consulta con tu contador."))
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn app(metrics_enabled: bool) -> Router {
        let mut settings = Settings::default();
        settings.observability.metrics_enabled = metrics_enabled;
        let advisor = AdvisorService::with_store(
            settings.agent.clone(),
            Arc::new(CannedAnswerer),
            Arc::new(InMemoryStore::new()),
        );
        create_router(AppState::new(settings, advisor))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(false), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_session() {
        let (status, body) = send(&app(false), post_json("/api/sessions", serde_json::json!({}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user_id"].as_str().unwrap().len(), 36);
        assert_eq!(body["welcome_messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["quick_replies"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_chat_routes_and_persists() {
        let app = app(false);

        let (status, body) = send(
            &app,
            post_json("/api/chat", serde_json::json!({ "user_id": "u1", "message": "guardar: sector=retail" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], "u1");
        assert_eq!(body["route"], "save_preference");

        let (_, body) = send(
            &app,
            post_json("/api/chat", serde_json::json!({ "user_id": "u1", "message": "Que impuestos pago?" })),
        )
        .await;
        assert_eq!(body["route"], "delegate");
        assert_eq!(body["reply"], "Consulta con tu contador.");

        let (status, body) = send(&app, get("/api/users/u1/preferences")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([{ "key": "sector", "value": "retail" }]));

        let (_, body) = send(&app, get("/api/users/u1/history?limit=2")).await;
        assert_eq!(
            body,
            serde_json::json!([
                { "role": "user", "content": "Que impuestos pago?" },
                { "role": "assistant", "content": "Consulta con tu contador." }
            ])
        );
    }

    #[tokio::test]
    async fn test_chat_generates_user_id_and_rejects_empty() {
        let app = app(false);

        let (status, body) = send(&app, post_json("/api/chat", serde_json::json!({ "message": "Gracias" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"], "courtesy");
        assert!(!body["user_id"].as_str().unwrap().is_empty());

        let (status, body) = send(&app, post_json("/api/chat", serde_json::json!({ "message": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn test_info() {
        let (status, body) = send(&app(false), get("/api/info")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], prompts::TITLE);
        assert_eq!(body["info"], prompts::INFO_MESSAGE);
    }

    #[tokio::test]
    async fn test_stats_gated_by_config() {
        let (status, _) = send(&app(false), get("/api/stats")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let app = app(true);
        send(&app, post_json("/api/chat", serde_json::json!({ "user_id": "u2", "message": "Como pago menos intereses?" }))).await;
        let (status, body) = send(&app, get("/api/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_calls"], 1);
        assert_eq!(body["error_calls"], 0);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let response = app(false).oneshot(get("/metrics")).await.unwrap();
        assert!(matches!(
            response.status(),
            StatusCode::OK | StatusCode::SERVICE_UNAVAILABLE
        ));
    }
}
