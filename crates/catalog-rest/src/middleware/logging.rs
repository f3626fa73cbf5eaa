//! Per-request access log.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs method, path, status and latency of every request.
///
/// Server errors are logged at `warn`; the handler has already logged the cause.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis();

    if response.status().is_server_error() {
        warn!(target: "http", %method, %path, status, elapsed_ms, %request_id, "Request failed");
    } else {
        info!(target: "http", %method, %path, status, elapsed_ms, %request_id, "Request completed");
    }

    response
}
