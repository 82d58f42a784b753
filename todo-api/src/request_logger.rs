//! Structured request logging middleware
//!
//! Tags every request with an `x-request-id` (taken from the request or
//! generated), runs the handler inside a span carrying that id, and logs one
//! line per request with status and latency.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Header used to correlate a request across logs and responses
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Incoming ids longer than this are replaced
const MAX_REQUEST_ID_LENGTH: usize = 128;

/// Request logging middleware
///
/// Logs requests in the form
/// `request_id=... method=GET path=/api/v1/todos status=200 latency_ms=3 Request completed`
pub async fn request_logging_middleware(mut request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| is_acceptable_request_id(id))
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    // Accepted ids are visible ASCII, generated ones are UUIDs, so this holds
    let header_value = HeaderValue::from_str(&request_id)
        .unwrap_or_else(|_| HeaderValue::from_static("invalid"));
    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER.clone(), header_value.clone());

    let span = info_span!("request", request_id = %request_id, method = %method, path = %path);
    let mut response = next.run(request).instrument(span).await;

    let latency_ms = start_time.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    if response.status().is_server_error() {
        error!(request_id = %request_id, %method, %path, status, latency_ms, "Request failed");
    } else if response.status().is_client_error() {
        warn!(request_id = %request_id, %method, %path, status, latency_ms, "Request rejected");
    } else {
        info!(request_id = %request_id, %method, %path, status, latency_ms, "Request completed");
    }

    response
        .headers_mut()
        .insert(REQUEST_ID_HEADER.clone(), header_value);
    response
}

/// Non-empty, bounded, visible ASCII only
fn is_acceptable_request_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LENGTH
        && id.bytes().all(|b| b.is_ascii_graphic())
}
