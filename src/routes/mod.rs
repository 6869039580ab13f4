//! Route assembly and the shared middleware stack.

mod common;
mod entity;
mod insight;
mod monitoring;

pub use common::common_routes;
pub use entity::entity_routes;
pub use insight::insight_routes;
pub use monitoring::monitoring_routes;

use crate::config::Settings;
use crate::middleware::monitor_requests;
use crate::state::AppState;
use crate::middleware::X_REQUEST_ID;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Request bodies above this size are rejected with 413.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// CORS from settings: `*` allows any origin, otherwise the listed origins.
/// Origins that are not valid header values are skipped with a warning.
pub fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origin = if settings.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = settings
            .cors_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Full application router. Used by the binary and by integration tests.
///
/// Layers, outermost first: CORS, body limit, request id, tracing, request id
/// propagation, then the request monitor closest to the routes.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.settings);
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(entity_routes(state.clone()))
        .merge(insight_routes(state.clone()))
        .merge(monitoring_routes(state))
        .layer(axum::middleware::from_fn(monitor_requests))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors)
}
