//! Request monitoring: execution time header plus one log line per request.
//! The request id itself is set and propagated by tower-http layers in `routes::build_app`.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use std::time::{Duration, Instant};

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
pub static X_EXECUTION_TIME: HeaderName = HeaderName::from_static("x-execution-time");

/// Requests slower than this are logged at warn level.
pub const SLOW_REQUEST: Duration = Duration::from_secs(1);

pub async fn monitor_requests(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(req).await;

    let elapsed = started.elapsed();
    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    let status = response.status().as_u16();
    if let Ok(v) = HeaderValue::from_str(&format!("{:.2}ms", elapsed_ms)) {
        response.headers_mut().insert(X_EXECUTION_TIME.clone(), v);
    }

    if elapsed > SLOW_REQUEST {
        tracing::warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            elapsed_ms,
            "slow request"
        );
    } else {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            elapsed_ms,
            "request completed"
        );
    }
    response
}
