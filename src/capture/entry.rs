//! Capture entries: one recorded interaction each.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Format of the human-readable capture time.
const CAPTURED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the file-name-safe capture time.
const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A capture that has been formatted but not yet stamped by the store.
///
/// The store assigns the id and timestamps when it inserts the draft, so ids
/// follow insertion order even when handlers race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureDraft {
    /// Best-effort client address.
    pub source_ip: String,
    /// Wire-like request text.
    pub raw_request: String,
    /// Wire-like response text.
    pub raw_response: String,
}

/// One immutable recorded interaction.
///
/// The JSON field names are the ones used by the bulk export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureEntry {
    id: i64,
    #[serde(rename = "timestamp")]
    captured_at: String,
    #[serde(rename = "filename_ts")]
    export_timestamp: String,
    #[serde(rename = "ip")]
    source_ip: String,
    raw_request: String,
    raw_response: String,
}

impl CaptureEntry {
    /// Build an entry from a draft, stamped with `id` and the capture time.
    pub fn new(id: i64, at: DateTime<Local>, draft: CaptureDraft) -> Self {
        Self {
            id,
            captured_at: at.format(CAPTURED_AT_FORMAT).to_string(),
            export_timestamp: at.format(EXPORT_TIMESTAMP_FORMAT).to_string(),
            source_ip: draft.source_ip,
            raw_request: draft.raw_request,
            raw_response: draft.raw_response,
        }
    }

    /// Nanosecond-based identifier, strictly increasing in insertion order.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Capture time with second precision, e.g. `2024-05-01 12:00:00`.
    pub fn captured_at(&self) -> &str {
        &self.captured_at
    }

    /// Capture time usable in file names, e.g. `20240501_120000`.
    pub fn export_timestamp(&self) -> &str {
        &self.export_timestamp
    }

    pub fn source_ip(&self) -> &str {
        &self.source_ip
    }

    pub fn raw_request(&self) -> &str {
        &self.raw_request
    }

    pub fn raw_response(&self) -> &str {
        &self.raw_response
    }

    /// Request and response joined into a single downloadable text.
    pub fn combined_text(&self) -> String {
        format!(
            "=== REQUEST ===\n{}\n\n=== RESPONSE ===\n{}",
            self.raw_request, self.raw_response
        )
    }
}
