//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::routing::MatcherOptions;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Pattern engine limits.
    pub matcher: MatcherOptions,

    /// Routes of the root router, used when no entrypoint claims a path.
    pub routes: Vec<RouteConfig>,

    /// Mount points, each with its own routes.
    pub entrypoints: Vec<EntrypointConfig>,
}

/// A single route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logs and reports.
    pub name: String,

    /// Pattern, implicitly anchored, e.g. `/product/(?P<id>[0-9]+)`.
    pub pattern: String,
}

/// A mount point and its routes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntrypointConfig {
    /// Entrypoint name or a path whose leading segment is the name.
    pub name: String,

    /// Routes matched against the path below the mount point.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
