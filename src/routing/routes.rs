//! Ordered route registry.
//!
//! # Responsibilities
//! - Compile and append routes in registration order
//! - Refuse duplicate patterns
//! - Report compile failures through a replaceable reporter
//!
//! # Design Decisions
//! - Append-only contiguous storage; registration order is match priority
//! - Growth failures surface as `OutOfMemory`, never abort
//! - A failed add leaves the registry untouched

use std::fmt;
use std::io::{IsTerminal, Write};
use std::sync::Arc;

use crate::error::{RoutingError, RoutingResult};
use crate::routing::matcher::{MatcherOptions, PatternMatcher};
use crate::routing::route::{Route, RouteMatch};

/// Receives the diagnostic text of a failed registration.
pub type ErrorReporter = Arc<dyn Fn(&str) + Send + Sync>;

/// Writes to stderr when it is attached to a terminal, otherwise stays quiet.
pub fn default_error_reporter(message: &str) {
    let mut stderr = std::io::stderr();
    if stderr.is_terminal() {
        let _ = writeln!(stderr, "{}", message);
        let _ = stderr.flush();
    }
}

/// Routes in registration order.
pub struct Routes<T, U = ()> {
    entries: Vec<Route<T, U>>,
    options: MatcherOptions,
    reporter: ErrorReporter,
}

impl<T, U> Routes<T, U> {
    pub fn new() -> Self {
        Self::with_options(MatcherOptions::default())
    }

    /// Create a registry whose patterns compile with `options`.
    pub fn with_options(options: MatcherOptions) -> Self {
        Self {
            entries: Vec::new(),
            options,
            reporter: Arc::new(default_error_reporter),
        }
    }

    /// Replace the reporter used by [`Routes::add`].
    pub fn set_error_reporter<F>(&mut self, reporter: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.reporter = Arc::new(reporter);
    }

    /// Register `pattern`, reporting any compile failure through the
    /// registry's error reporter before returning it.
    pub fn add<F>(&mut self, pattern: &str, data: T, handler: F) -> RoutingResult<()>
    where
        F: Fn(&RouteMatch<'_, T, U>) + Send + Sync + 'static,
    {
        let mut message = String::new();
        let result = self.add_with_message(pattern, data, handler, &mut message);
        if !message.is_empty() {
            (self.reporter)(&message);
        }
        result
    }

    /// Register `pattern`, writing any compile diagnostic into `message`
    /// instead of the error reporter.
    pub fn add_with_message<F>(
        &mut self,
        pattern: &str,
        data: T,
        handler: F,
        message: &mut String,
    ) -> RoutingResult<()>
    where
        F: Fn(&RouteMatch<'_, T, U>) + Send + Sync + 'static,
    {
        if pattern.is_empty() {
            return Err(RoutingError::InvalidArgument("pattern must not be empty"));
        }
        if self.contains(pattern) {
            return Err(RoutingError::AlreadyExists {
                key: pattern.to_string(),
            });
        }

        let matcher = match PatternMatcher::compile_with(pattern, &self.options) {
            Ok(matcher) => matcher,
            Err(e) => {
                tracing::warn!(pattern = %pattern, error = %e, "Route pattern rejected");
                message.clear();
                message.push_str(&e.to_string());
                return Err(e.into());
            }
        };

        self.entries.try_reserve(1)?;
        self.entries.push(Route::new(matcher, data, Box::new(handler)));

        tracing::debug!(pattern = %pattern, position = self.entries.len() - 1, "Route registered");
        Ok(())
    }

    /// Whether a route was registered with exactly this (unanchored) pattern.
    pub fn contains(&self, pattern: &str) -> bool {
        self.entries.iter().any(|r| r.raw_pattern() == pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Route<T, U>> {
        self.entries.get(index)
    }

    /// Routes in match priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, Route<T, U>> {
        self.entries.iter()
    }

    /// Drop every route and its compiled pattern.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.entries.shrink_to_fit();
    }
}

impl<T, U> Default for Routes<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, U> IntoIterator for &'a Routes<T, U> {
    type Item = &'a Route<T, U>;
    type IntoIter = std::slice::Iter<'a, Route<T, U>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, U> fmt::Debug for Routes<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routes")
            .field("entries", &self.entries)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn noop(_: &RouteMatch<'_, &'static str>) {}

    #[test]
    fn test_preserves_registration_order() {
        let mut routes = Routes::new();
        routes.add("/foo/bar", "a", noop).unwrap();
        routes.add("/bar", "b", noop).unwrap();
        routes.add("/baz", "c", noop).unwrap();

        let patterns: Vec<_> = routes.iter().map(|r| r.pattern()).collect();
        assert_eq!(patterns, ["^/foo/bar$", "^/bar$", "^/baz$"]);
    }

    #[test]
    fn test_duplicate_pattern_rejected() {
        let mut routes = Routes::new();
        routes.add("/foo", "a", noop).unwrap();
        let err = routes.add("/foo", "b", noop).unwrap_err();
        assert_eq!(err, RoutingError::AlreadyExists { key: "/foo".into() });
        assert_eq!(routes.len(), 1);
        assert_eq!(*routes.get(0).unwrap().data(), "a");
    }

    #[test]
    fn test_prefix_of_existing_pattern_is_distinct() {
        let mut routes = Routes::new();
        routes.add("/product/(?P<id>[0-9]+)", "a", noop).unwrap();
        routes.add("/product", "b", noop).unwrap();
        assert_eq!(routes.len(), 2);
    }

    #[test]
    fn test_empty_pattern_is_invalid() {
        let mut routes = Routes::new();
        let err = routes.add("", "a", noop).unwrap_err();
        assert!(matches!(err, RoutingError::InvalidArgument(_)));
    }

    #[test]
    fn test_compile_failure_is_reported() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let mut routes = Routes::new();
        routes.set_error_reporter(move |msg| sink.lock().unwrap().push(msg.to_string()));

        let err = routes.add("/broken/(", "a", noop).unwrap_err();
        assert!(matches!(err, RoutingError::Compile(_)));
        assert!(routes.is_empty());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("pattern compilation failed at offset"));
    }

    #[test]
    fn test_add_with_message_bypasses_reporter() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();

        let mut routes = Routes::new();
        routes.set_error_reporter(move |_| *counter.lock().unwrap() += 1);

        let mut message = String::new();
        let err = routes
            .add_with_message("/a\\K", "a", noop, &mut message)
            .unwrap_err();
        assert!(matches!(err, RoutingError::Compile(_)));
        assert!(message.contains("\\K is not allowed"));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_duplicates_are_not_reported() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();

        let mut routes = Routes::new();
        routes.set_error_reporter(move |_| *counter.lock().unwrap() += 1);
        routes.add("/a", "a", noop).unwrap();
        assert!(routes.add("/a", "a", noop).is_err());
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_clear() {
        let mut routes = Routes::new();
        routes.add("/a", "a", noop).unwrap();
        routes.add("/b", "b", noop).unwrap();
        routes.clear();
        assert!(routes.is_empty());
        routes.add("/a", "a", noop).unwrap();
        assert_eq!(routes.len(), 1);
    }
}
