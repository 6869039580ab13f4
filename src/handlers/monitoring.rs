//! Search and sort metrics read-outs.

use crate::metrics::{MetricsSnapshot, SearchMetrics, SortMetrics};
use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub async fn all_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

pub async fn search_metrics(State(state): State<AppState>) -> Json<SearchMetrics> {
    Json(state.metrics.search_metrics())
}

pub async fn sort_metrics(State(state): State<AppState>) -> Json<SortMetrics> {
    Json(state.metrics.sort_metrics())
}

#[derive(Serialize)]
pub struct MonitoringHealth {
    status: &'static str,
    message: &'static str,
    metrics_available: bool,
    timestamp: DateTime<Utc>,
}

pub async fn monitoring_health() -> Json<MonitoringHealth> {
    Json(MonitoringHealth {
        status: "healthy",
        message: "Metrics collection is active",
        metrics_available: true,
        timestamp: Utc::now(),
    })
}
