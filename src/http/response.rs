//! Real responses sent back to capture clients.

use axum::{
    body::Body,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::routing::RouteDecision;

/// Build the response the client actually receives for a routed request.
pub fn capture_response(decision: &RouteDecision, content_type: &str) -> Response {
    let mut response = (decision.status, Body::from(decision.body.clone())).into_response();
    if let Ok(value) = HeaderValue::from_str(content_type) {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    response
}
