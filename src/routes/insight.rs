//! Insight routes.

use crate::handlers::insight::{insight_from_body, insight_from_query};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn insight_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/simulate-ai-insight/",
            get(insight_from_query).post(insight_from_body),
        )
        .route(
            "/simulate-ai-insight",
            get(insight_from_query).post(insight_from_body),
        )
        .with_state(state)
}
