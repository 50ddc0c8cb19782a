use std::sync::Arc;

use crate::config::Config;
use crate::scoring::service::ScoringService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Scoring orchestration. Holds the pool and the pluggable
    /// `Arc<dyn MatchScorer>` backend injected at startup.
    pub scoring: Arc<ScoringService>,
}
