//! Service root and dependency health.

use crate::health::{check_database, HealthReport, Services};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to {}", state.settings.project_name),
        "version": state.settings.app_version,
        "status": "running"
    }))
}

/// Always 200; degraded dependencies show up in the body.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let (postgresql, star_wars_api) = tokio::join!(check_database(&state.pool), state.upstream.check());
    Json(HealthReport::new(
        state.settings.project_name.clone(),
        state.settings.app_version.clone(),
        Services {
            postgresql,
            star_wars_api,
        },
    ))
}
