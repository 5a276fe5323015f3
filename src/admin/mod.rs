//! Admin surface: inspect, export and clear the capture log.
//!
//! Requests under the admin path never produce captures.

pub mod export;
pub mod handlers;
pub mod view;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::http::server::AppState;
use self::handlers::*;

pub use export::{AdminError, AdminExporter, EntryExport, CLEAR_ACK};

/// Routes mounted under `admin_path` (e.g. `/admin`).
pub fn setup_admin_router(admin_path: &str) -> Router<AppState> {
    Router::new()
        .route(admin_path, get(get_view))
        .route(&format!("{}/clear", admin_path), get(clear).post(clear))
        .route(&format!("{}/logs.json", admin_path), get(get_logs))
        .route(&format!("{}/logs/{{id}}", admin_path), get(get_log_text))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
