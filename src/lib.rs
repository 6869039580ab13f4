//! Holocron: people and planets REST service with paginated search and sort over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod insight;
pub mod metrics;
pub mod middleware;
pub mod migration;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{resource_by_path, ResourceDef, Settings, PEOPLE, PLANETS, RESOURCES};
pub use error::{AppError, ConfigError};
pub use health::{HttpUpstreamProbe, ServiceStatus, UpstreamProbe};
pub use metrics::{InMemoryMetrics, MetricsCollector, NoopMetrics};
pub use migration::apply_migrations;
pub use query::ListQuery;
pub use response::Page;
pub use routes::build_app;
pub use service::CrudService;
pub use state::AppState;
pub use store::ensure_database_exists;
