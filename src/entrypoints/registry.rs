//! Sorted entrypoint registry.

use crate::entrypoints::entrypoint::Entrypoint;
use crate::error::{RoutingError, RoutingResult};

/// Split a path into its entrypoint key and the remaining path.
///
/// One leading `/` is skipped and the key runs to the next `/`. The rest
/// always starts with `/`.
///
/// ```
/// use route_dispatch::entrypoints::split_entrypoint;
///
/// assert_eq!(split_entrypoint("/billing/invoices"), ("billing", "/invoices"));
/// assert_eq!(split_entrypoint("billing"), ("billing", "/"));
/// assert_eq!(split_entrypoint("/"), ("", "/"));
/// ```
pub fn split_entrypoint(path: &str) -> (&str, &str) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.find('/') {
        Some(i) => (&trimmed[..i], &trimmed[i..]),
        None => (trimmed, "/"),
    }
}

/// The entrypoint key of a name or path.
pub fn key_of(path_or_name: &str) -> &str {
    split_entrypoint(path_or_name).0
}

/// Entrypoints kept sorted by key.
#[derive(Debug, Clone)]
pub struct Entrypoints<T> {
    list: Vec<Entrypoint<T>>,
}

impl<T> Entrypoints<T> {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    fn search(&self, key: &str) -> Result<usize, usize> {
        self.list.binary_search_by(|e| e.name().cmp(key))
    }

    /// Register `user_data` under the key of `path_or_name`.
    pub fn add(&mut self, path_or_name: &str, user_data: T) -> RoutingResult<()> {
        if path_or_name.is_empty() {
            return Err(RoutingError::InvalidArgument("entrypoint must not be empty"));
        }
        let key = key_of(path_or_name);
        let index = match self.search(key) {
            Ok(_) => {
                return Err(RoutingError::AlreadyExists {
                    key: key.to_string(),
                })
            }
            Err(index) => index,
        };

        self.list.try_reserve(1)?;
        self.list
            .insert(index, Entrypoint::new(key.to_string(), user_data));

        tracing::debug!(entrypoint = %key, total = self.list.len(), "Entrypoint registered");
        Ok(())
    }

    /// Look up the entrypoint for the key of `path_or_name`.
    pub fn find(&self, path_or_name: &str) -> RoutingResult<&Entrypoint<T>> {
        self.find_mount(path_or_name).map(|(entrypoint, _)| entrypoint)
    }

    /// Look up the entrypoint for `path` and return the path below it.
    pub fn find_mount<'p>(&self, path: &'p str) -> RoutingResult<(&Entrypoint<T>, &'p str)> {
        if path.is_empty() {
            return Err(RoutingError::InvalidArgument("entrypoint must not be empty"));
        }
        let (key, rest) = split_entrypoint(path);
        let index = self.search(key).map_err(|_| RoutingError::NotFound)?;
        Ok((&self.list[index], rest))
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Entrypoints in key order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entrypoint<T>> {
        self.list.iter()
    }

    /// Drop every entrypoint and its key.
    pub fn clear(&mut self) {
        self.list.clear();
        self.list.shrink_to_fit();
    }
}

impl<T> Default for Entrypoints<T> {
    fn default() -> Self {
        Self::new()
    }
}
