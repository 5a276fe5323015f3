//! Wire-like text renderings of requests and responses.
//!
//! The output is meant for people reading an archive, not for replay: header
//! names are canonicalized, bodies are decoded lossily, and lines end in CRLF
//! as in an HTTP/1.1 message.

use std::time::SystemTime;

use axum::http::{header, HeaderMap, StatusCode};

const CRLF: &str = "\r\n";

/// Everything the formatter needs from an inbound request.
#[derive(Debug, Clone, Copy)]
pub struct RequestParts<'a> {
    pub method: &'a str,
    /// Path plus query string, or the absolute form when the client sent one.
    pub target: &'a str,
    pub protocol: &'a str,
    /// Authority from the request URI; used for `Host` when the header is absent.
    pub authority: Option<&'a str>,
    pub headers: &'a HeaderMap,
    pub body: &'a [u8],
}

/// The response recorded next to a captured request.
#[derive(Debug, Clone, Copy)]
pub struct ResponseParts<'a> {
    pub status: StatusCode,
    pub content_type: &'a str,
    pub include_content_length: bool,
    pub date: SystemTime,
    pub body: &'a str,
}

/// Render a request as `<METHOD> <TARGET> <PROTOCOL>`, one line per header
/// value, a blank line, then the body (omitted when empty).
pub fn format_request(parts: &RequestParts<'_>) -> String {
    let mut out = String::with_capacity(256 + parts.body.len());
    out.push_str(parts.method);
    out.push(' ');
    out.push_str(parts.target);
    out.push(' ');
    out.push_str(parts.protocol);
    out.push_str(CRLF);

    if !parts.headers.contains_key(header::HOST) {
        if let Some(authority) = parts.authority {
            push_header(&mut out, "Host", authority);
        }
    }

    for name in parts.headers.keys() {
        let canonical = canonical_header_name(name.as_str());
        for value in parts.headers.get_all(name) {
            push_header(&mut out, &canonical, &String::from_utf8_lossy(value.as_bytes()));
        }
    }

    out.push_str(CRLF);
    if !parts.body.is_empty() {
        out.push_str(&String::from_utf8_lossy(parts.body));
    }
    out
}

/// Render the synthetic response: status line, `Date`, `Content-Type`,
/// optionally `Content-Length`, a blank line, then the body.
pub fn format_response(parts: &ResponseParts<'_>) -> String {
    let mut out = String::with_capacity(128 + parts.body.len());
    out.push_str("HTTP/1.1 ");
    out.push_str(parts.status.as_str());
    if let Some(reason) = parts.status.canonical_reason() {
        out.push(' ');
        out.push_str(reason);
    }
    out.push_str(CRLF);

    push_header(&mut out, "Date", &httpdate::fmt_http_date(parts.date));
    push_header(&mut out, "Content-Type", parts.content_type);
    if parts.include_content_length {
        push_header(&mut out, "Content-Length", &parts.body.len().to_string());
    }

    out.push_str(CRLF);
    out.push_str(parts.body);
    out
}

fn push_header(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push_str(CRLF);
}

/// `x-forwarded-for` → `X-Forwarded-For`.
pub fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    out
}
