//! SSRF Monitor Library
//!
//! Capture pipeline (formatter, bounded log store), the axum server that
//! feeds it, and the admin surface that reads it.

pub mod admin;
pub mod capture;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use capture::{CaptureEntry, LogStore};
pub use config::MonitorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
