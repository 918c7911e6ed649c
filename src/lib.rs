//! Request routing core for an embeddable HTTP server.
//!
//! Paths are matched against an ordered list of regular-expression routes;
//! the first match runs its handler with the captured variables. An
//! entrypoint registry selects a per-mount router by the leading path segment.
//!
//! ```
//! use route_dispatch::{Router, Routes, RoutingError};
//! use std::cell::RefCell;
//!
//! let mut routes: Routes<&str, RefCell<String>> = Routes::new();
//! routes.add("/product/(?P<id>[0-9]+)", "product", |m| {
//!     *m.user_data().borrow_mut() = m.var("id").unwrap_or_default().to_string();
//! }).unwrap();
//! let router = Router::new(routes).unwrap();
//!
//! let out = RefCell::new(String::new());
//! router.dispatch("/product/123", &out).unwrap();
//! assert_eq!(*out.borrow(), "123");
//! assert_eq!(router.dispatch("/product/abc", &out), Err(RoutingError::NotFound));
//! ```

pub mod config;
pub mod entrypoints;
pub mod error;
pub mod observability;
pub mod routing;
pub mod table;

pub use config::RouterConfig;
pub use entrypoints::{Entrypoint, Entrypoints};
pub use error::{CompileError, RoutingError, RoutingResult};
pub use routing::{DispatchObserver, PatternMatcher, Route, RouteMatch, Router, Routes};
pub use table::{DispatchReport, RouteTable};
