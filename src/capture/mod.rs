//! Capture subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (http::server capture handler)
//!     → formatter.rs (request text + synthetic response text)
//!     → entry.rs (CaptureDraft)
//!     → store.rs (stamped with id/timestamps, prepended, tail evicted)
//!
//! admin surface
//!     → store.rs snapshot() / clear()
//! ```
//!
//! # Design Decisions
//! - The store is an owned value shared through `Arc`, never a global
//! - Entries are immutable; the store only prepends, truncates and clears
//! - Snapshots are copies, so readers never observe later mutations

pub mod entry;
pub mod formatter;
pub mod store;

pub use entry::{CaptureDraft, CaptureEntry};
pub use formatter::{format_request, format_response, RequestParts, ResponseParts};
pub use store::LogStore;
