//! Error types shared by the routing and entrypoint subsystems.

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// A pattern that could not be compiled.
///
/// `offset` is the byte offset into the anchored pattern text (`^pattern$`)
/// where the engine detected the problem, when the engine reports one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    message: String,
    offset: Option<usize>,
}

impl CompileError {
    pub(crate) fn new(message: impl Into<String>, offset: Option<usize>) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }

    /// The engine's diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the failure in the anchored pattern, if known.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(
                f,
                "pattern compilation failed at offset {}: {}",
                offset, self.message
            ),
            None => write!(f, "pattern compilation failed: {}", self.message),
        }
    }
}

impl std::error::Error for CompileError {}

/// Errors returned by route registration, dispatch and entrypoint lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// A required input was empty or the registry is not usable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A route with the same pattern or an entrypoint with the same key exists.
    #[error("{key:?} already exists")]
    AlreadyExists { key: String },

    /// No route matched the path, or no entrypoint has the key.
    #[error("not found")]
    NotFound,

    /// The pattern failed to compile; nothing was registered.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// A registry could not grow.
    #[error("out of memory")]
    OutOfMemory,

    /// A dispatch observer stopped dispatch with the given code.
    #[error("dispatch interrupted (code {0})")]
    Interrupted(i32),
}

impl From<TryReserveError> for RoutingError {
    fn from(_: TryReserveError) -> Self {
        RoutingError::OutOfMemory
    }
}

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;
