//! Route table compiled from configuration.
//!
//! # Responsibilities
//! - Build one router per entrypoint plus an optional root router
//! - Resolve a path: pick the entrypoint by leading segment, dispatch the rest
//! - Describe the match as a serializable report
//!
//! # Design Decisions
//! - An entrypoint owns everything below it; a miss there is `NotFound`
//!   rather than a retry on the root router
//! - Unknown leading segments fall through to the root router with the full path

use std::cell::RefCell;

use serde::Serialize;

use crate::config::{RouteConfig, RouterConfig};
use crate::entrypoints::Entrypoints;
use crate::error::{RoutingError, RoutingResult};
use crate::routing::{MatcherOptions, RouteMatch, Router, Routes};

/// Data attached to every configured route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub name: String,
}

type ReportSlot = RefCell<Option<DispatchReport>>;
type TableRouter = Router<RouteInfo, ReportSlot>;

/// One named capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

/// What a resolved path matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Entrypoint that claimed the path, `None` for the root router.
    pub entrypoint: Option<String>,
    pub route: String,
    /// Anchored pattern of the route.
    pub pattern: String,
    /// Path seen by the router (below the entrypoint, if any).
    pub path: String,
    pub segments: Vec<String>,
    /// Named captures in group order.
    pub vars: Vec<Variable>,
}

fn record(m: &RouteMatch<'_, RouteInfo, ReportSlot>) {
    let report = DispatchReport {
        entrypoint: None,
        route: m.data().name.clone(),
        pattern: m.pattern().to_string(),
        path: m.path().to_string(),
        segments: m.segments().map(str::to_string).collect(),
        vars: m
            .vars()
            .map(|(name, value)| Variable {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect(),
    };
    *m.user_data().borrow_mut() = Some(report);
}

fn build_router(routes: &[RouteConfig], options: MatcherOptions) -> RoutingResult<TableRouter> {
    let mut table = Routes::with_options(options);
    let mut message = String::new();
    for route in routes {
        let info = RouteInfo {
            name: route.name.clone(),
        };
        if let Err(e) = table.add_with_message(&route.pattern, info, record, &mut message) {
            tracing::error!(route = %route.name, pattern = %route.pattern, error = %e, "Failed to register route");
            return Err(e);
        }
    }
    Router::new(table)
}

/// Entrypoints and routers built from a [`RouterConfig`].
#[derive(Debug)]
pub struct RouteTable {
    entrypoints: Entrypoints<TableRouter>,
    root: Option<TableRouter>,
}

impl RouteTable {
    pub fn from_config(config: &RouterConfig) -> RoutingResult<Self> {
        if config.routes.is_empty() && config.entrypoints.is_empty() {
            return Err(RoutingError::InvalidArgument("configuration declares no routes"));
        }

        let root = if config.routes.is_empty() {
            None
        } else {
            Some(build_router(&config.routes, config.matcher)?)
        };

        let mut entrypoints = Entrypoints::new();
        for entrypoint in &config.entrypoints {
            let router = build_router(&entrypoint.routes, config.matcher)?;
            entrypoints.add(&entrypoint.name, router)?;
        }

        tracing::info!(
            entrypoints = entrypoints.len(),
            root_routes = root.as_ref().map_or(0, |r| r.routes().len()),
            "Route table built"
        );
        Ok(Self { entrypoints, root })
    }

    pub fn entrypoints(&self) -> &Entrypoints<TableRouter> {
        &self.entrypoints
    }

    pub fn root(&self) -> Option<&TableRouter> {
        self.root.as_ref()
    }

    /// Find the route for `path` and describe the match.
    pub fn resolve(&self, path: &str) -> RoutingResult<DispatchReport> {
        if path.is_empty() {
            return Err(RoutingError::InvalidArgument("path must not be empty"));
        }

        let (entrypoint, router, rest) = match self.entrypoints.find_mount(path) {
            Ok((entrypoint, rest)) => (Some(entrypoint.name()), entrypoint.user_data(), rest),
            Err(RoutingError::NotFound) => match &self.root {
                Some(root) => (None, root, path),
                None => return Err(RoutingError::NotFound),
            },
            Err(e) => return Err(e),
        };

        let slot = ReportSlot::default();
        router.dispatch(rest, &slot)?;

        let mut report = slot.into_inner().ok_or(RoutingError::NotFound)?;
        report.entrypoint = entrypoint.map(str::to_string);
        Ok(report)
    }
}
