//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, routing table)
//!     → request.rs (request ID, client address, request-target)
//!     → admin routes ─────────────→ admin::handlers
//!     → everything else → capture_handler
//!           → routing::CaptureRouter (status, body, record?)
//!           → capture::formatter + capture::LogStore
//!     → response.rs (real response to the client)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
