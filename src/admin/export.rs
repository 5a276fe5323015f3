//! Snapshot export and the admin view model.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::admin::view::{render_page, EntryView, PageView};
use crate::capture::{CaptureEntry, LogStore};

/// Acknowledgement returned by a clear.
pub const CLEAR_ACK: &str = "ok";

/// Errors surfaced by the admin surface.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("failed to serialize capture log: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Admin request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "failed to render capture log").into_response()
    }
}

/// A single entry prepared for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryExport {
    /// `<domain>_<export timestamp>.txt`
    pub file_name: String,
    /// Request and response joined with section markers.
    pub text: String,
    /// `text`, base64-encoded.
    pub base64: String,
}

/// Read-only view over the log store for inspection and export.
///
/// The exporter never creates captures; apart from `clear_all` it only reads
/// snapshots.
pub struct AdminExporter {
    store: Arc<LogStore>,
    domain: String,
    admin_path: String,
}

impl AdminExporter {
    pub fn new(store: Arc<LogStore>, domain: impl Into<String>, admin_path: impl Into<String>) -> Self {
        Self {
            store,
            domain: domain.into(),
            admin_path: admin_path.into(),
        }
    }

    /// Copy of the current log, newest first.
    pub fn snapshot(&self) -> Vec<CaptureEntry> {
        self.store.snapshot()
    }

    /// Copy of one retained entry.
    pub fn find(&self, id: i64) -> Option<CaptureEntry> {
        self.store.get(id)
    }

    /// Render the admin page for the current snapshot.
    pub fn render_view(&self) -> Result<String, AdminError> {
        let snapshot = self.store.snapshot();
        let all_logs_base64 = export_all_base64(&snapshot)?;

        let entries = snapshot
            .iter()
            .map(|entry| EntryView {
                entry,
                export: self.entry_export(entry),
            })
            .collect();

        Ok(render_page(&PageView {
            domain: &self.domain,
            admin_path: &self.admin_path,
            bulk_file_name: self.bulk_file_name(),
            all_logs_base64,
            entries,
        }))
    }

    /// Empty the store. Clearing an empty store is not an error.
    pub fn clear_all(&self) -> &'static str {
        self.store.clear();
        tracing::info!("Capture log cleared");
        CLEAR_ACK
    }

    /// Combined text of one entry, ready for download.
    pub fn entry_export(&self, entry: &CaptureEntry) -> EntryExport {
        let text = entry.combined_text();
        EntryExport {
            file_name: format!("{}_{}.txt", self.domain, entry.export_timestamp()),
            base64: STANDARD.encode(text.as_bytes()),
            text,
        }
    }

    /// File name of the bulk JSON download.
    pub fn bulk_file_name(&self) -> String {
        format!("ssrf_logs_{}.json", self.domain)
    }
}

/// Serialize a snapshot to the bulk export JSON array.
pub fn export_json(entries: &[CaptureEntry]) -> Result<String, AdminError> {
    Ok(serde_json::to_string(entries)?)
}

/// The bulk export JSON, base64-encoded for embedding in the page.
pub fn export_all_base64(entries: &[CaptureEntry]) -> Result<String, AdminError> {
    Ok(STANDARD.encode(export_json(entries)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureDraft;

    fn exporter_with(n: usize) -> AdminExporter {
        let store = Arc::new(LogStore::new(10));
        for i in 0..n {
            store.record(CaptureDraft {
                source_ip: format!("198.51.100.{}", i),
                raw_request: format!("GET /log?i={} HTTP/1.1\r\nHost: a.b\r\n\r\n", i),
                raw_response: "HTTP/1.1 200 OK\r\n\r\nLogged".to_string(),
            });
        }
        AdminExporter::new(store, "oob.example.com", "/admin")
    }

    #[test]
    fn bulk_export_round_trips() {
        let exporter = exporter_with(3);
        let snapshot = exporter.snapshot();

        let encoded = export_all_base64(&snapshot).unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        let parsed: Vec<CaptureEntry> = serde_json::from_slice(&decoded).unwrap();

        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn empty_snapshot_exports_empty_array() {
        assert_eq!(export_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn entry_export_is_named_after_domain_and_timestamp() {
        let exporter = exporter_with(1);
        let entry = exporter.snapshot().remove(0);
        let export = exporter.entry_export(&entry);

        assert_eq!(
            export.file_name,
            format!("oob.example.com_{}.txt", entry.export_timestamp())
        );
        assert!(export.text.starts_with("=== REQUEST ===\nGET /log?i=0 HTTP/1.1"));
        assert!(export.text.contains("\n\n=== RESPONSE ===\nHTTP/1.1 200 OK"));
        assert_eq!(STANDARD.decode(&export.base64).unwrap(), export.text.as_bytes());
    }

    #[test]
    fn clear_all_is_idempotent() {
        let exporter = exporter_with(2);
        assert_eq!(exporter.clear_all(), "ok");
        assert!(exporter.snapshot().is_empty());
        assert_eq!(exporter.clear_all(), "ok");
        assert!(exporter.snapshot().is_empty());
    }

    #[test]
    fn render_view_embeds_bulk_blob() {
        let exporter = exporter_with(2);
        let expected = export_all_base64(&exporter.snapshot()).unwrap();
        let html = exporter.render_view().unwrap();

        assert!(html.contains(&expected));
        assert!(html.contains("ssrf_logs_oob.example.com.json"));
    }
}
