use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::admin::export::AdminError;
use crate::capture::CaptureEntry;
use crate::http::server::AppState;

/// `GET <admin>`: the inspection page.
pub async fn get_view(State(state): State<AppState>) -> Result<Html<String>, AdminError> {
    state.exporter.render_view().map(Html)
}

/// `GET|POST <admin>/clear`
pub async fn clear(State(state): State<AppState>) -> &'static str {
    state.exporter.clear_all()
}

/// `GET <admin>/logs.json`: the bulk export as a JSON array.
pub async fn get_logs(State(state): State<AppState>) -> Json<Vec<CaptureEntry>> {
    Json(state.exporter.snapshot())
}

/// `GET <admin>/logs/{id}`: one entry's combined text as an attachment.
pub async fn get_log_text(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let Some(entry) = state.exporter.find(id) else {
        return (StatusCode::NOT_FOUND, "capture not found").into_response();
    };

    let export = state.exporter.entry_export(&entry);
    let mut response = export.text.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    if let Ok(value) =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", export.file_name))
    {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    response
}
