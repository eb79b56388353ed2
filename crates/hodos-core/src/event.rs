//! Per-request context types.
//!
//! The [`RequestEvent`] carries everything a middleware chain and handler
//! need for one request: the raw request data, the captured route
//! parameters, the parsed query, the request-scoped locals store, the
//! shared application config, and the mutable response builder.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Method};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hodos_router::Params;

use crate::request::Request;
use crate::response::ResponseBuilder;
use crate::store::{ConfigStore, Locals};

/// A unique identifier for each request, using UUID v7.
///
/// UUID v7 is time-ordered, which makes request ids sortable in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-request context passed by mutable reference through the middleware
/// chain and into the handler.
///
/// Created by the application context once a route has matched, and
/// discarded after the response is produced. The locals store belongs
/// exclusively to this event; the config store is shared with the whole
/// application and is read-only during request handling.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use hodos_core::{ConfigStore, Request, RequestEvent};
/// use hodos_core::Params;
///
/// let mut params = Params::new();
/// params.push("id", "42");
///
/// let mut event = RequestEvent::new(
///     Request::get("/users/42"),
///     params,
///     HashMap::new(),
///     Arc::new(ConfigStore::new()),
/// );
///
/// assert_eq!(event.param("id"), Some("42"));
/// let response = event.response().text("hello");
/// assert_eq!(response.status(), 200);
/// ```
#[derive(Debug)]
pub struct RequestEvent {
    id: RequestId,
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Bytes,
    params: Params,
    query: HashMap<String, String>,
    locals: Locals,
    config: Arc<ConfigStore>,
    response: ResponseBuilder,
}

impl RequestEvent {
    /// Builds an event from a raw request plus the route-lookup results.
    #[must_use]
    pub fn new(
        request: Request,
        params: Params,
        query: HashMap<String, String>,
        config: Arc<ConfigStore>,
    ) -> Self {
        let (method, uri, headers, body) = request.into_parts();
        Self {
            id: RequestId::new(),
            method,
            uri,
            headers,
            body,
            params,
            query,
            locals: Locals::new(),
            config,
            response: ResponseBuilder::new(),
        }
    }

    /// Returns the request id.
    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the raw URL, query string included.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the path portion of the URL, without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.split_once('?').map_or(self.uri.as_str(), |(path, _)| path)
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the value of a captured path parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Returns all captured path parameters.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the value of a query parameter.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Returns all parsed query parameters.
    #[must_use]
    pub fn query_map(&self) -> &HashMap<String, String> {
        &self.query
    }

    /// Returns the request-scoped locals store.
    #[must_use]
    pub fn locals(&self) -> &Locals {
        &self.locals
    }

    /// Returns the locals store mutably.
    pub fn locals_mut(&mut self) -> &mut Locals {
        &mut self.locals
    }

    /// Returns the shared application config store.
    #[must_use]
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Returns the response builder.
    #[must_use]
    pub fn response(&self) -> &ResponseBuilder {
        &self.response
    }

    /// Returns the response builder mutably.
    pub fn response_mut(&mut self) -> &mut ResponseBuilder {
        &mut self.response
    }
}
