//! Entrypoint (mount point) subsystem.
//!
//! # Data Flow
//! ```text
//! Setup:
//!     "billing" | "/billing/..." + user data
//!     → registry.rs (extract key, reject duplicates, insert sorted)
//!
//! Per request:
//!     "/billing/invoices/42"
//!     → registry.rs (key "billing", binary search)
//!     → Entrypoint { name, user_data } + remaining path "/invoices/42"
//! ```
//!
//! # Design Decisions
//! - Sorted vector + binary search: small, built once, read on every request
//! - Keys are byte-ordered and unique
//! - Lookups borrow the key from the input and never allocate

pub mod entrypoint;
pub mod registry;

pub use entrypoint::Entrypoint;
pub use registry::{key_of, split_entrypoint, Entrypoints};
