//! Capture route lookup.
//!
//! Decides, from the request path alone, what the monitor answers and whether
//! the interaction is recorded.

use axum::http::StatusCode;

use crate::config::CaptureConfig;
use crate::routing::matcher::{ExactPathMatcher, Matcher};

/// Body of the real 404 answered for unrecognized paths.
pub const NOT_FOUND_BODY: &str = "404 Not Found";

/// Which recognized path, if any, a request hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Liveness,
    Log,
    Favicon,
    Unmatched,
}

impl RouteKind {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Liveness => "liveness",
            RouteKind::Log => "log",
            RouteKind::Favicon => "favicon",
            RouteKind::Unmatched => "unmatched",
        }
    }
}

/// The outcome of routing one capture request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    pub kind: RouteKind,
    pub status: StatusCode,
    pub body: String,
    /// Whether a capture entry is created for this request.
    pub record: bool,
}

/// Immutable path table built from the capture configuration.
#[derive(Debug)]
pub struct CaptureRouter {
    liveness: ExactPathMatcher,
    log: ExactPathMatcher,
    favicon: ExactPathMatcher,
    liveness_body: String,
    log_body: String,
    record_favicon: bool,
    record_unmatched: bool,
}

impl CaptureRouter {
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            liveness: ExactPathMatcher::new(config.liveness_path.clone()),
            log: ExactPathMatcher::new(config.log_path.clone()),
            favicon: ExactPathMatcher::new(config.favicon_path.clone()),
            liveness_body: config.liveness_body.clone(),
            log_body: config.log_body.clone(),
            record_favicon: config.record_favicon,
            record_unmatched: config.record_unmatched,
        }
    }

    /// Route a request path (without query string).
    pub fn route(&self, path: &str) -> RouteDecision {
        if self.favicon.matches(path) {
            return RouteDecision {
                kind: RouteKind::Favicon,
                status: StatusCode::NOT_FOUND,
                body: String::new(),
                record: self.record_favicon,
            };
        }

        if self.liveness.matches(path) {
            return RouteDecision {
                kind: RouteKind::Liveness,
                status: StatusCode::OK,
                body: self.liveness_body.clone(),
                record: true,
            };
        }

        if self.log.matches(path) {
            return RouteDecision {
                kind: RouteKind::Log,
                status: StatusCode::OK,
                body: self.log_body.clone(),
                record: true,
            };
        }

        RouteDecision {
            kind: RouteKind::Unmatched,
            status: StatusCode::NOT_FOUND,
            body: NOT_FOUND_BODY.to_string(),
            record: self.record_unmatched,
        }
    }
}
