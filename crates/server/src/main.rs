//! SME Advisor Server Entry Point

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use sme_advisor_agent::AdvisorService;
use sme_advisor_config::{load_settings, Settings};
use sme_advisor_llm::{LlmAnswerGenerator, LlmBackend, OpenAIBackend, OpenAIConfig};
use sme_advisor_server::{create_router, init_metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env} > config/default > defaults
    let env = std::env::var("SME_ADVISOR_ENV").ok();
    let config = load_settings(env.as_deref()).context("Failed to load configuration")?;

    init_tracing(&config);

    tracing::info!("Starting SME Advisor Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?config.environment,
        config_path = env.as_deref().unwrap_or("default"),
        model = %config.llm.model,
        "Configuration loaded"
    );

    if init_metrics().is_some() {
        tracing::info!("Initialized Prometheus metrics at /metrics");
    }

    let backend = match OpenAIBackend::new(OpenAIConfig::from_settings(&config.llm)) {
        Ok(backend) => backend,
        Err(e) => {
            tracing::error!(error = %e, "Language model backend could not be created");
            return Err(e).context("Set OPENAI_API_KEY or point llm.endpoint at a local server");
        }
    };
    if !backend.is_available().await {
        tracing::warn!(
            endpoint = %config.llm.endpoint,
            "Language model endpoint is not reachable, delegated questions will get the apology"
        );
    }
    let answerer = Arc::new(LlmAnswerGenerator::new(backend));

    let store = sme_advisor_persistence::init(None);
    let advisor = AdvisorService::with_store(config.agent.clone(), answerer, store);
    tracing::info!(
        memory_window = config.agent.memory_window,
        calculators_enabled = config.agent.calculators_enabled,
        "Initialized advisor service"
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;

    let app = create_router(AppState::new(config, advisor));

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("sme_advisor={},tower_http=debug", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}
