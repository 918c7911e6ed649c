//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and log levels
//! - Detect duplicate patterns and entrypoint keys
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Patterns are not compiled here; compile errors surface when the table is built

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::entrypoints::key_of;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown log level {0:?}")]
    LogLevel(String),

    #[error("matcher.{0} must be greater than zero")]
    ZeroLimit(&'static str),

    #[error("{scope}: route #{index} has an empty {field}")]
    EmptyField {
        scope: String,
        index: usize,
        field: &'static str,
    },

    #[error("{scope}: pattern {pattern:?} is registered more than once")]
    DuplicatePattern { scope: String, pattern: String },

    #[error("entrypoint {0:?} is declared more than once")]
    DuplicateEntrypoint(String),

    #[error("entrypoint {0:?} has no routes")]
    NoRoutes(String),

    #[error("entrypoint #{0} has an empty name")]
    EmptyEntrypoint(usize),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }
    if config.matcher.size_limit == 0 {
        errors.push(ValidationError::ZeroLimit("size_limit"));
    }
    if config.matcher.dfa_size_limit == 0 {
        errors.push(ValidationError::ZeroLimit("dfa_size_limit"));
    }

    validate_routes("routes", &config.routes, &mut errors);

    let mut keys = HashSet::new();
    for (index, entrypoint) in config.entrypoints.iter().enumerate() {
        if entrypoint.name.is_empty() {
            errors.push(ValidationError::EmptyEntrypoint(index));
            continue;
        }
        let key = key_of(&entrypoint.name);
        if !keys.insert(key) {
            errors.push(ValidationError::DuplicateEntrypoint(key.to_string()));
        }
        if entrypoint.routes.is_empty() {
            errors.push(ValidationError::NoRoutes(key.to_string()));
        }
        validate_routes(&format!("entrypoint {:?}", key), &entrypoint.routes, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(scope: &str, routes: &[RouteConfig], errors: &mut Vec<ValidationError>) {
    let mut patterns = HashSet::new();
    for (index, route) in routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyField {
                scope: scope.to_string(),
                index,
                field: "name",
            });
        }
        if route.pattern.is_empty() {
            errors.push(ValidationError::EmptyField {
                scope: scope.to_string(),
                index,
                field: "pattern",
            });
        } else if !patterns.insert(route.pattern.as_str()) {
            errors.push(ValidationError::DuplicatePattern {
                scope: scope.to_string(),
                pattern: route.pattern.clone(),
            });
        }
    }
}
