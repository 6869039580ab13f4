#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use holocron::config::Settings;
use holocron::health::{ServiceStatus, UpstreamProbe};
use holocron::metrics::{InMemoryMetrics, MetricsCollector};
use holocron::{apply_migrations, build_app, AppState};

/// Upstream probe with a fixed answer, so tests never leave the process.
pub struct FixedProbe(pub ServiceStatus);

#[async_trait]
impl UpstreamProbe for FixedProbe {
    async fn check(&self) -> ServiceStatus {
        self.0.clone()
    }
}

pub fn test_settings() -> Settings {
    Settings::from_lookup(|_| None).expect("default settings")
}

pub fn test_state(pool: PgPool, metrics: Arc<dyn MetricsCollector>, upstream: ServiceStatus) -> AppState {
    AppState {
        pool,
        settings: Arc::new(test_settings()),
        metrics,
        upstream: Arc::new(FixedProbe(upstream)),
    }
}

/// Create the tables, then build the full router with in-memory metrics and a connected upstream.
pub async fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_metrics(pool, Arc::new(InMemoryMetrics::new())).await
}

pub async fn build_test_app_with_metrics(pool: PgPool, metrics: Arc<dyn MetricsCollector>) -> Router {
    apply_migrations(&pool).await.expect("migrations");
    build_app(test_state(pool, metrics, ServiceStatus::connected()))
}

pub async fn send(app: Router, req: Request<Body>) -> Response<Body> {
    app.oneshot(req).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::put(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST one entity and return its id.
pub async fn seed(app: &Router, uri: &str, body: serde_json::Value) -> i64 {
    let resp = post_json(app.clone(), uri, body).await;
    assert_eq!(resp.status(), axum::http::StatusCode::CREATED);
    body_json(resp).await["id"].as_i64().unwrap()
}
