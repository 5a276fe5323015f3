//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming capture request (path)
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: RouteDecision (status, body, record?)
//!
//! Route Compilation (at startup):
//!     CaptureConfig
//!     → Compile exact matchers
//!     → Freeze as immutable CaptureRouter
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same path always yields the same decision
//! - Admin paths never reach this router; axum dispatches them first

pub mod matcher;
pub mod router;

pub use router::{CaptureRouter, RouteDecision, RouteKind, NOT_FOUND_BODY};
