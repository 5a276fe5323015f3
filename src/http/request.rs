//! Request inspection helpers.
//!
//! # Responsibilities
//! - Assign a request ID to every request without touching its headers
//! - Resolve the best-effort client address
//! - Recover the request-target and protocol label as the client sent them

use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, Uri, Version},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Header consulted first when resolving the client address.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Request ID stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Access to the request ID of a request.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
            .unwrap_or("unknown")
    }
}

/// Attach a request ID and echo it on the response.
///
/// An ID sent by the client is reused. The ID lives in request extensions only;
/// request headers are left exactly as received so captures stay faithful.
pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(id.clone()));
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}

/// Client address: the first `X-Forwarded-For` hop, trimmed, else the peer IP.
pub fn resolve_source_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get(X_FORWARDED_FOR)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .and_then(|v| {
            let first = v.split(',').next().unwrap_or_default().trim();
            (!first.is_empty()).then(|| first.to_string())
        })
        .unwrap_or_else(|| peer.ip().to_string())
}

/// The request-target as it appeared on the request line.
///
/// HTTP/1.x absolute-form targets (proxy-style requests) are kept whole; for
/// HTTP/2 and later the URI always carries the authority, so only the path
/// and query are used.
pub fn request_target(uri: &Uri, version: Version) -> String {
    let absolute_form = uri.scheme().is_some() && version < Version::HTTP_2;
    if absolute_form {
        return uri.to_string();
    }
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string())
}

/// `HTTP/1.1`, `HTTP/2.0`, ...
pub fn protocol_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/1.1",
    }
}
