//! The raw request delivered by the transport.

use bytes::Bytes;
use http::{HeaderMap, Method};

/// A raw HTTP request as handed over by the transport: method, URL string,
/// headers, and the fully-read body.
///
/// The application context turns this into a
/// [`RequestEvent`](crate::RequestEvent) after route lookup.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Bytes,
}

impl Request {
    /// Creates a request from its parts.
    #[must_use]
    pub fn new(method: Method, uri: impl Into<String>, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers,
            body,
        }
    }

    /// Creates a bodyless GET request. Convenient in tests.
    #[must_use]
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::GET, uri, HeaderMap::new(), Bytes::new())
    }

    /// Creates a POST request with the given body.
    #[must_use]
    pub fn post(uri: impl Into<String>, body: Bytes) -> Self {
        Self::new(Method::POST, uri, HeaderMap::new(), body)
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the raw URL (path plus optional query string).
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a mutable reference to the headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Decomposes the request.
    #[must_use]
    pub fn into_parts(self) -> (Method, String, HeaderMap, Bytes) {
        (self.method, self.uri, self.headers, self.body)
    }
}
