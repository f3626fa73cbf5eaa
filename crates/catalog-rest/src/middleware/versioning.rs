//! API version reporting.

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Response header listing the API versions this service serves.
pub const SUPPORTED_VERSIONS_HEADER: HeaderName = HeaderName::from_static("api-supported-versions");

/// Versions advertised in [`SUPPORTED_VERSIONS_HEADER`].
pub const SUPPORTED_VERSIONS: &str = "1.0, 2.0";

/// Adds the supported API versions to every API response.
pub async fn api_version_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(SUPPORTED_VERSIONS_HEADER, HeaderValue::from_static(SUPPORTED_VERSIONS));
    response
}
