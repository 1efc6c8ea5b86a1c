//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use sme_advisor_agent::AdvisorService;
use sme_advisor_config::Settings;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub advisor: Arc<AdvisorService>,
}

impl AppState {
    pub fn new(config: Settings, advisor: AdvisorService) -> Self {
        Self {
            config: Arc::new(config),
            advisor: Arc::new(advisor),
        }
    }

    /// Whether the statistics endpoint is exposed
    pub fn metrics_enabled(&self) -> bool {
        self.config.observability.metrics_enabled
    }
}
