//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration for the monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Capture pipeline settings: retention, recognized paths, synthetic bodies.
    pub capture: CaptureConfig,

    /// Labels used when rendering the admin view.
    pub display: DisplayConfig,

    /// Admin surface settings.
    pub admin: AdminConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Transport limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl MonitorConfig {
    /// Domain shown in the admin view and used in export file names.
    ///
    /// Falls back to `localhost:<port>` when no domain was configured.
    pub fn display_domain(&self) -> String {
        match self.display.domain.as_deref() {
            Some(domain) if !domain.trim().is_empty() => domain.trim().to_string(),
            _ => {
                let port = self
                    .listener
                    .bind_address
                    .parse::<SocketAddr>()
                    .map(|addr| addr.port())
                    .unwrap_or(DEFAULT_PORT);
                format!("localhost:{}", port)
            }
        }
    }
}

/// Port the monitor listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 3001;

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: format!("0.0.0.0:{}", DEFAULT_PORT),
        }
    }
}

/// Capture pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Maximum number of captures retained, newest first.
    pub max_logs: usize,

    /// Path answered with `liveness_body`.
    pub liveness_path: String,

    /// Path answered with `log_body`.
    pub log_path: String,

    /// Favicon path, answered with 404.
    pub favicon_path: String,

    /// Body returned for the liveness path.
    pub liveness_body: String,

    /// Body returned for the log path.
    pub log_body: String,

    /// Content-Type of the real and recorded responses.
    pub content_type: String,

    /// Emit `Content-Length` in the recorded response text.
    pub include_content_length: bool,

    /// Record requests to unrecognized paths instead of ignoring them.
    pub record_unmatched: bool,

    /// Record favicon requests instead of ignoring them.
    pub record_favicon: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_logs: 50,
            liveness_path: "/".to_string(),
            log_path: "/log".to_string(),
            favicon_path: "/favicon.ico".to_string(),
            liveness_body: "Active".to_string(),
            log_body: "Logged".to_string(),
            content_type: "text/plain; charset=utf-8".to_string(),
            include_content_length: true,
            record_unmatched: false,
            record_favicon: false,
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DisplayConfig {
    /// Public domain of the monitor (e.g., "oob.example.com").
    pub domain: Option<String>,
}

/// Admin surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount point of the admin view; clear and export routes live below it.
    pub path: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            path: "/admin".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Transport limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
