//! Routes and per-dispatch match values.

use std::fmt;

use regex::Regex;

use crate::routing::matcher::{PatternMatch, PatternMatcher, Segments, Vars};

/// Callback invoked when a route matches.
pub type RouteHandler<T, U> = Box<dyn Fn(&RouteMatch<'_, T, U>) + Send + Sync>;

/// A registered pattern paired with its handler and route data.
///
/// `T` is the data attached at registration, `U` the per-dispatch context.
pub struct Route<T, U = ()> {
    matcher: PatternMatcher,
    handler: RouteHandler<T, U>,
    data: T,
}

impl<T, U> Route<T, U> {
    pub(crate) fn new(matcher: PatternMatcher, data: T, handler: RouteHandler<T, U>) -> Self {
        Self {
            matcher,
            handler,
            data,
        }
    }

    /// The anchored pattern, e.g. `^/product/(?P<id>[0-9]+)$`.
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    /// The pattern as it was registered, without anchors.
    pub fn raw_pattern(&self) -> &str {
        let anchored = self.pattern();
        &anchored[1..anchored.len() - 1]
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// The underlying engine handle.
    pub fn handle(&self) -> &Regex {
        self.matcher.as_regex()
    }

    /// Data attached when the route was registered.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Match `path` against this route without invoking the handler.
    pub fn find<'a>(&'a self, path: &'a str, user_data: &'a U) -> Option<RouteMatch<'a, T, U>> {
        self.matcher.find(path).map(|captures| RouteMatch {
            route: self,
            captures,
            user_data,
        })
    }

    pub(crate) fn invoke(&self, matched: &RouteMatch<'_, T, U>) {
        (self.handler)(matched)
    }
}

impl<T: fmt::Debug, U> fmt::Debug for Route<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern())
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

/// The outcome of one successful dispatch.
///
/// Lives only for the duration of the call that produced it; a route keeps
/// no record of past matches.
pub struct RouteMatch<'a, T, U = ()> {
    route: &'a Route<T, U>,
    captures: PatternMatch<'a>,
    user_data: &'a U,
}

impl<'a, T, U> RouteMatch<'a, T, U> {
    pub fn route(&self) -> &'a Route<T, U> {
        self.route
    }

    /// The path that matched.
    pub fn path(&self) -> &'a str {
        self.captures.path()
    }

    /// The anchored pattern of the matched route.
    pub fn pattern(&self) -> &'a str {
        self.route.pattern()
    }

    /// Route data.
    pub fn data(&self) -> &'a T {
        &self.route.data
    }

    /// Per-dispatch context passed by the caller.
    pub fn user_data(&self) -> &'a U {
        self.user_data
    }

    pub fn captures(&self) -> &PatternMatch<'a> {
        &self.captures
    }

    /// Positional captures (groups 1 and up).
    pub fn segments(&self) -> Segments<'_> {
        self.captures.segments()
    }

    /// Named captures in group-index order.
    pub fn vars(&self) -> Vars<'_> {
        self.route.matcher.vars(&self.captures)
    }

    /// Value of the named group `name`; `None` if the pattern has no such group.
    pub fn var(&self, name: &str) -> Option<&'a str> {
        let index = self
            .route
            .matcher
            .as_regex()
            .capture_names()
            .position(|n| n == Some(name))?;
        Some(self.captures.get(index).unwrap_or(""))
    }
}

impl<T, U> fmt::Debug for RouteMatch<'_, T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.pattern())
            .field("path", &self.path())
            .field("count", &self.captures.count())
            .finish()
    }
}
