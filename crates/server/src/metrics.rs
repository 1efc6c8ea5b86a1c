//! Prometheus metrics
//!
//! The recorder is global; it is installed once and shared by every router.

use axum::{http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use sme_advisor_agent::{LlmCallOutcome, RouteKind};

static PROMETHEUS: OnceCell<Option<PrometheusHandle>> = OnceCell::new();

/// Install the Prometheus recorder, returning its handle.
///
/// Safe to call repeatedly. Returns `None` when another recorder was
/// already installed by the process.
pub fn init_metrics() -> Option<PrometheusHandle> {
    PROMETHEUS
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install Prometheus recorder");
                None
            }
        })
        .clone()
}

/// `GET /metrics`
pub async fn metrics_handler() -> impl IntoResponse {
    match init_metrics() {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder unavailable".to_string(),
        ),
    }
}

/// Count one handled message by route
pub fn record_message(route: RouteKind) {
    ::metrics::counter!("sme_advisor_messages_total", "route" => route.as_str()).increment(1);
}

/// Record latency and failures of a language-model call
pub fn record_llm_call(call: &LlmCallOutcome) {
    ::metrics::histogram!("sme_advisor_llm_latency_seconds")
        .record(call.latency_ms as f64 / 1000.0);
    if call.is_error() {
        ::metrics::counter!("sme_advisor_llm_errors_total").increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sme_advisor_core::TokenUsage;

    #[test]
    fn test_render_contains_recorded_series() {
        let handle = init_metrics().expect("recorder installed");

        record_message(RouteKind::Calculator);
        record_llm_call(&LlmCallOutcome {
            model: Some("gpt-4o-mini".to_string()),
            latency_ms: 1200,
            usage: TokenUsage::default(),
            error: Some("timeout".to_string()),
        });

        let rendered = handle.render();
        assert!(rendered.contains("sme_advisor_messages_total{route=\"calculator\"}"));
        assert!(rendered.contains("sme_advisor_llm_errors_total"));
        assert!(rendered.contains("sme_advisor_llm_latency_seconds"));

        // Second init reuses the same recorder
        assert!(init_metrics().is_some());
    }
}
