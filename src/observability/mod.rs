//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / entrypoints / config produce:
//!     → tracing events (debug on setup, warn on rejected patterns,
//!       trace per dispatch)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, text or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured fields (pattern, path, entrypoint) rather than formatted text
//! - Per-dispatch events are trace level so the hot path stays quiet

pub mod logging;
