//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Own the registered routes
//! - Scan them in registration order and run the first match's handler
//! - Let an observer veto candidates or matches
//!
//! # Design Decisions
//! - First match wins, no fallthrough
//! - Dispatch takes `&self`; match state lives on the stack of the call, so a
//!   shared router can be dispatched from many threads
//! - No match is an ordinary `NotFound`, not a failure

use std::fmt;
use std::ops::ControlFlow;

use crate::error::{RoutingError, RoutingResult};
use crate::routing::route::{Route, RouteMatch};
use crate::routing::routes::Routes;

/// Hooks around each dispatch step.
///
/// Returning `ControlFlow::Break(code)` stops dispatch and surfaces
/// `RoutingError::Interrupted(code)` to the caller.
pub trait DispatchObserver<T, U> {
    /// Called for each candidate before its pattern is evaluated.
    fn before_match(&mut self, _path: &str, _route: &Route<T, U>) -> ControlFlow<i32> {
        ControlFlow::Continue(())
    }

    /// Called after a route matched, before its handler runs.
    fn after_match(&mut self, _matched: &RouteMatch<'_, T, U>) -> ControlFlow<i32> {
        ControlFlow::Continue(())
    }
}

/// Observer that never interferes.
impl<T, U> DispatchObserver<T, U> for () {}

/// Dispatches paths to the first matching route.
pub struct Router<T, U = ()> {
    routes: Routes<T, U>,
}

impl<T, U> Router<T, U> {
    /// Build a router; at least one route is required.
    pub fn new(routes: Routes<T, U>) -> RoutingResult<Self> {
        if routes.is_empty() {
            return Err(RoutingError::InvalidArgument("router requires at least one route"));
        }
        tracing::debug!(routes = routes.len(), "Router created");
        Ok(Self { routes })
    }

    pub fn routes(&self) -> &Routes<T, U> {
        &self.routes
    }

    /// Drop every route. Dispatch fails with `InvalidArgument` until the
    /// router is rebuilt.
    pub fn clear(&mut self) {
        self.routes.clear();
    }

    pub fn into_routes(self) -> Routes<T, U> {
        self.routes
    }

    /// Run the handler of the first route matching `path`.
    pub fn dispatch(&self, path: &str, user_data: &U) -> RoutingResult<()> {
        self.dispatch_with(path, user_data, &mut ())
    }

    /// Like [`Router::dispatch`], with an observer consulted at each step.
    pub fn dispatch_with<O>(&self, path: &str, user_data: &U, observer: &mut O) -> RoutingResult<()>
    where
        O: DispatchObserver<T, U> + ?Sized,
    {
        if path.is_empty() {
            return Err(RoutingError::InvalidArgument("path must not be empty"));
        }
        if self.routes.is_empty() {
            return Err(RoutingError::InvalidArgument("router has no routes"));
        }

        for route in &self.routes {
            if let ControlFlow::Break(code) = observer.before_match(path, route) {
                return Err(RoutingError::Interrupted(code));
            }
            let Some(matched) = route.find(path, user_data) else {
                continue;
            };
            if let ControlFlow::Break(code) = observer.after_match(&matched) {
                return Err(RoutingError::Interrupted(code));
            }
            tracing::trace!(path = %path, pattern = %route.pattern(), "Route matched");
            route.invoke(&matched);
            return Ok(());
        }

        tracing::trace!(path = %path, "No route matched");
        Err(RoutingError::NotFound)
    }
}

impl<T: fmt::Debug, U> fmt::Debug for Router<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("routes", &self.routes).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    type Log = RefCell<Vec<String>>;

    fn record(m: &RouteMatch<'_, &'static str, Log>) {
        m.user_data().borrow_mut().push(m.data().to_string());
    }

    fn router() -> Router<&'static str, Log> {
        let mut routes = Routes::new();
        routes.add("/foo/bar", "foo-bar", record).unwrap();
        routes.add("/foo/(?P<rest>.*)", "foo-any", record).unwrap();
        routes.add("/bar", "bar", record).unwrap();
        Router::new(routes).unwrap()
    }

    #[test]
    fn test_new_requires_routes() {
        let err = Router::<(), ()>::new(Routes::new()).unwrap_err();
        assert!(matches!(err, RoutingError::InvalidArgument(_)));
    }

    #[test]
    fn test_first_match_wins() {
        let router = router();
        let log = Log::default();
        router.dispatch("/foo/bar", &log).unwrap();
        assert_eq!(*log.borrow(), ["foo-bar"]);

        router.dispatch("/foo/baz", &log).unwrap();
        assert_eq!(*log.borrow(), ["foo-bar", "foo-any"]);
    }

    #[test]
    fn test_not_found_and_empty_path() {
        let router = router();
        let log = Log::default();
        assert_eq!(router.dispatch("/nope", &log), Err(RoutingError::NotFound));
        assert!(matches!(
            router.dispatch("", &log),
            Err(RoutingError::InvalidArgument(_))
        ));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_cleared_router_rejects_dispatch() {
        let mut router = router();
        router.clear();
        assert!(matches!(
            router.dispatch("/bar", &Log::default()),
            Err(RoutingError::InvalidArgument(_))
        ));
    }

    struct CountingObserver {
        candidates: usize,
        veto_pattern: Option<&'static str>,
    }

    impl DispatchObserver<&'static str, Log> for CountingObserver {
        fn before_match(&mut self, _path: &str, route: &Route<&'static str, Log>) -> ControlFlow<i32> {
            self.candidates += 1;
            if Some(route.pattern()) == self.veto_pattern {
                return ControlFlow::Break(405);
            }
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn test_before_match_sees_each_candidate() {
        let router = router();
        let log = Log::default();
        let mut observer = CountingObserver {
            candidates: 0,
            veto_pattern: None,
        };
        router.dispatch_with("/bar", &log, &mut observer).unwrap();
        assert_eq!(observer.candidates, 3);
        assert_eq!(*log.borrow(), ["bar"]);
    }

    #[test]
    fn test_before_match_can_interrupt() {
        let router = router();
        let log = Log::default();
        let mut observer = CountingObserver {
            candidates: 0,
            veto_pattern: Some("^/foo/(?P<rest>.*)$"),
        };
        let err = router.dispatch_with("/bar", &log, &mut observer).unwrap_err();
        assert_eq!(err, RoutingError::Interrupted(405));
        assert_eq!(observer.candidates, 2);
        assert!(log.borrow().is_empty());
    }

    struct RejectAfterMatch;

    impl DispatchObserver<&'static str, Log> for RejectAfterMatch {
        fn after_match(&mut self, matched: &RouteMatch<'_, &'static str, Log>) -> ControlFlow<i32> {
            match matched.var("rest") {
                Some("secret") => ControlFlow::Break(403),
                _ => ControlFlow::Continue(()),
            }
        }
    }

    #[test]
    fn test_after_match_can_interrupt() {
        let router = router();
        let log = Log::default();
        let err = router
            .dispatch_with("/foo/secret", &log, &mut RejectAfterMatch)
            .unwrap_err();
        assert_eq!(err, RoutingError::Interrupted(403));
        assert!(log.borrow().is_empty());

        router
            .dispatch_with("/foo/public", &log, &mut RejectAfterMatch)
            .unwrap();
        assert_eq!(*log.borrow(), ["foo-any"]);
    }
}
