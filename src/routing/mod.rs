//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     pattern + data + handler
//!     → routes.rs (duplicate check, append in order)
//!     → matcher.rs (anchor, compile case-insensitively)
//!     → Router::new (freeze the ordered list)
//!
//! Dispatch (per request):
//!     decoded path + per-call context
//!     → router.rs (scan routes in registration order)
//!     → matcher.rs (evaluate, capture)
//!     → route.rs (RouteMatch handed to the handler)
//!     → Ok, or NotFound when nothing matched
//! ```
//!
//! # Design Decisions
//! - Linear scan over independently compiled patterns; route counts are small
//! - First match wins (ordered by registration, not specificity)
//! - Captures are returned per call, routes hold no match state

pub mod matcher;
pub mod route;
pub mod router;
pub mod routes;

pub use matcher::{MatcherOptions, PatternMatch, PatternMatcher, Segments, Vars};
pub use route::{Route, RouteHandler, RouteMatch};
pub use router::{DispatchObserver, Router};
pub use routes::{default_error_reporter, ErrorReporter, Routes};
