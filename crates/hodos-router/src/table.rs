//! Ordered route table with first-match lookup.

use std::collections::HashMap;

use http::Method;

use crate::params::Params;
use crate::pattern::{PatternError, RoutePattern};
use crate::query::parse_query;

/// A registered route: method, compiled pattern, and the endpoint payload
/// supplied by the application layer.
///
/// Routes are immutable once registered and live for the lifetime of the
/// table.
#[derive(Debug, Clone)]
pub struct Route<T> {
    method: Method,
    pattern: RoutePattern,
    data: T,
}

impl<T> Route<T> {
    /// Returns the HTTP method this route answers to.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Returns the endpoint payload.
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }
}

/// A successful lookup: the matched route's payload, the captured path
/// parameters, and the parsed query string.
#[derive(Debug)]
pub struct RouteMatch<'a, T> {
    /// Payload of the matched route.
    pub data: &'a T,
    /// Parameters captured by the pattern (empty if none declared).
    pub params: Params,
    /// Parsed query parameters (empty if the URL had no query string).
    pub query: HashMap<String, String>,
}

/// An ordered collection of routes, scanned linearly on lookup.
///
/// Lookup tests routes **in registration order** and returns the first
/// structural match for the request method. Overlapping patterns resolve
/// purely by insertion position, with no specificity heuristics: an earlier
/// `/home/:id` shadows a later `/home/profile`.
///
/// The table is generic over the endpoint payload `T` so that handlers and
/// middleware, which live in higher layers, can ride along without this
/// crate depending on them.
#[derive(Debug, Clone)]
pub struct RouteTable<T> {
    routes: Vec<Route<T>>,
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<T> RouteTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `pattern` and appends a route.
    ///
    /// Duplicate patterns are accepted; the earlier registration keeps
    /// winning lookups by position.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern does not compile.
    pub fn register(&mut self, method: Method, pattern: &str, data: T) -> Result<(), PatternError> {
        let pattern = RoutePattern::compile(pattern)?;
        self.routes.push(Route {
            method,
            pattern,
            data,
        });
        Ok(())
    }

    /// Finds the first route matching `method` and `url`.
    ///
    /// The URL is split at the first `?`; the leading part is matched
    /// against route patterns and the remainder is parsed as the query
    /// string. Returns `None` when no registered route matches.
    #[must_use]
    pub fn lookup(&self, method: &Method, url: &str) -> Option<RouteMatch<'_, T>> {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, query),
            None => (url, ""),
        };

        for route in &self.routes {
            if route.method != *method {
                continue;
            }
            if let Some(params) = route.pattern.matches(path) {
                return Some(RouteMatch {
                    data: &route.data,
                    params,
                    query: parse_query(query),
                });
            }
        }

        None
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the registered routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }
}
