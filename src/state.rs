//! Shared application state for all routes.

use crate::config::Settings;
use crate::health::UpstreamProbe;
use crate::metrics::MetricsCollector;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub settings: Arc<Settings>,
    /// Receives search/sort events from list requests.
    pub metrics: Arc<dyn MetricsCollector>,
    pub upstream: Arc<dyn UpstreamProbe>,
}
