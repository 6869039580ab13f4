//! Metrics routes under /monitoring.

use crate::handlers::monitoring::{all_metrics, monitoring_health, search_metrics, sort_metrics};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn monitoring_routes(state: AppState) -> Router {
    Router::new()
        .route("/monitoring/metrics", get(all_metrics))
        .route("/monitoring/metrics/search", get(search_metrics))
        .route("/monitoring/metrics/sort", get(sort_metrics))
        .route("/monitoring/health", get(monitoring_health))
        .with_state(state)
}
