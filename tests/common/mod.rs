//! Shared utilities for integration tests.

use std::sync::Mutex;

use route_dispatch::{RouteMatch, Router, Routes};

/// What a handler saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub route: &'static str,
    pub path: String,
    pub vars: Vec<(String, String)>,
}

/// Per-dispatch context collecting handler invocations.
pub type Calls = Mutex<Vec<Call>>;

pub fn record(m: &RouteMatch<'_, &'static str, Calls>) {
    let call = Call {
        route: m.data(),
        path: m.path().to_string(),
        vars: m
            .vars()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
    };
    m.user_data().lock().unwrap().push(call);
}

/// The four-route router used throughout the tests, in registration order.
pub fn sample_router() -> Router<&'static str, Calls> {
    let mut routes = Routes::new();
    routes.add("/foo/bar", "foo-bar-data", record).unwrap();
    routes.add("/bar", "bar-data", record).unwrap();
    routes
        .add("/customer/(?P<name>[a-zA-Z]+)", "customer-data", record)
        .unwrap();
    routes
        .add("/product/(?P<id>[0-9]+)", "product-data", record)
        .unwrap();
    Router::new(routes).unwrap()
}

#[allow(dead_code)]
pub fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
}
