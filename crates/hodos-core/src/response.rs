//! Response construction.
//!
//! A [`ResponseBuilder`] accumulates status, status text, and headers while
//! the request moves through middleware and the handler. One of the
//! finalizer methods then freezes the accumulated state together with a body
//! into an immutable [`Response`].

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::HeaderMap;
use serde::Serialize;

use crate::error::{HodosError, HodosResult};

const DEFAULT_STATUS: u16 = 200;
const DEFAULT_STATUS_TEXT: &str = "OK";

/// A finalized, immutable HTTP response.
///
/// Produced by the [`ResponseBuilder`] finalizers. The status text is kept
/// on the value for handlers, middleware, and tests; the transport decides
/// whether the wire protocol can carry it.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    status_text: String,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the status text.
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Returns the headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the `Content-Type` header, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Returns the body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns a copy of this response with one header added or replaced.
    ///
    /// Post-processing middleware uses this to annotate a response produced
    /// further down the chain without reopening a builder.
    ///
    /// # Errors
    ///
    /// Returns [`HodosError`] if the name or value is empty or not a valid
    /// HTTP header.
    pub fn with_header(mut self, name: &str, value: &str) -> HodosResult<Self> {
        let (name, value) = parse_header(name, value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Decomposes the response for the transport boundary.
    #[must_use]
    pub fn into_parts(self) -> (u16, String, HeaderMap, Bytes) {
        (self.status, self.status_text, self.headers, self.body)
    }
}

/// Mutable accumulator for status code, status text, and headers.
///
/// Each request event owns exactly one builder. Mutators validate their
/// input and fail without changing state; finalizers borrow the builder, so
/// calling one never mutates it, and a second finalizer call on the same
/// builder produces an independent [`Response`] reflecting the state
/// accumulated at that moment.
///
/// # Example
///
/// ```rust
/// use hodos_core::ResponseBuilder;
///
/// let mut builder = ResponseBuilder::new();
/// builder.set_status(201).unwrap();
/// builder.set_header("x-request-id", "abc123").unwrap();
///
/// let response = builder.json(&serde_json::json!({"created": true})).unwrap();
/// assert_eq!(response.status(), 201);
/// assert_eq!(response.content_type(), Some("application/json"));
/// ```
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    status: u16,
    status_text: String,
    headers: HeaderMap,
}

impl ResponseBuilder {
    /// Creates a builder with status `200 OK` and no headers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: DEFAULT_STATUS,
            status_text: DEFAULT_STATUS_TEXT.to_string(),
            headers: HeaderMap::new(),
        }
    }

    /// Sets the status code.
    ///
    /// # Errors
    ///
    /// Returns [`HodosError::InvalidStatus`] if `code` is outside
    /// `100..=599`; the builder is left unchanged.
    pub fn set_status(&mut self, code: u16) -> HodosResult<&mut Self> {
        if !(100..=599).contains(&code) {
            return Err(HodosError::invalid_status(code));
        }
        self.status = code;
        Ok(self)
    }

    /// Sets the status text.
    ///
    /// # Errors
    ///
    /// Returns [`HodosError::EmptyValue`] if `text` is empty.
    pub fn set_status_text(&mut self, text: impl Into<String>) -> HodosResult<&mut Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(HodosError::empty_value("status text"));
        }
        self.status_text = text;
        Ok(self)
    }

    /// Sets a header, replacing any previous value under the same name.
    /// Header names are case-insensitive per wire convention.
    ///
    /// # Errors
    ///
    /// Returns [`HodosError::EmptyValue`] if the name or value is empty, or
    /// [`HodosError::InvalidHeader`] if the HTTP layer rejects either.
    pub fn set_header(&mut self, name: &str, value: &str) -> HodosResult<&mut Self> {
        let (name, value) = parse_header(name, value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Returns the accumulated status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the accumulated status text.
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Returns the accumulated headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Finalizes into a `text/plain` response.
    #[must_use]
    pub fn text(&self, body: impl Into<String>) -> Response {
        self.finalize(Some("text/plain"), Bytes::from(body.into()))
    }

    /// Finalizes into a `text/html` response.
    #[must_use]
    pub fn html(&self, body: impl Into<String>) -> Response {
        self.finalize(Some("text/html"), Bytes::from(body.into()))
    }

    /// Serializes `value` and finalizes into an `application/json` response.
    ///
    /// # Errors
    ///
    /// Returns [`HodosError::Json`] if serialization fails.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> HodosResult<Response> {
        let body = serde_json::to_vec(value)?;
        Ok(self.finalize(Some("application/json"), Bytes::from(body)))
    }

    /// Finalizes into a response with the given raw body and **no**
    /// content-type stamp. Whatever `Content-Type` was set through
    /// [`set_header`](Self::set_header), if any, is carried as-is.
    #[must_use]
    pub fn raw(&self, body: impl Into<Bytes>) -> Response {
        self.finalize(None, body.into())
    }

    fn finalize(&self, content_type: Option<&'static str>, body: Bytes) -> Response {
        let mut headers = self.headers.clone();
        if let Some(value) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        }
        Response {
            status: self.status,
            status_text: self.status_text.clone(),
            headers,
            body,
        }
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates and parses a header pair.
fn parse_header(name: &str, value: &str) -> HodosResult<(HeaderName, HeaderValue)> {
    if name.is_empty() {
        return Err(HodosError::empty_value("header name"));
    }
    if value.is_empty() {
        return Err(HodosError::empty_value("header value"));
    }
    let parsed_name: HeaderName = name
        .parse()
        .map_err(|e: http::header::InvalidHeaderName| HodosError::invalid_header(name, e.to_string()))?;
    let parsed_value: HeaderValue = value
        .parse()
        .map_err(|e: http::header::InvalidHeaderValue| HodosError::invalid_header(name, e.to_string()))?;
    Ok((parsed_name, parsed_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let builder = ResponseBuilder::new();
        assert_eq!(builder.status(), 200);
        assert_eq!(builder.status_text(), "OK");
        assert!(builder.headers().is_empty());
    }

    #[test]
    fn test_status_range() {
        let mut builder = ResponseBuilder::new();
        assert!(matches!(
            builder.set_status(99),
            Err(HodosError::InvalidStatus { code: 99 })
        ));
        assert!(matches!(
            builder.set_status(600),
            Err(HodosError::InvalidStatus { code: 600 })
        ));
        // Boundaries are inclusive.
        builder.set_status(100).unwrap();
        builder.set_status(599).unwrap();
        assert_eq!(builder.status(), 599);
    }

    #[test]
    fn test_failed_status_leaves_builder_unchanged() {
        let mut builder = ResponseBuilder::new();
        builder.set_status(404).unwrap();
        let _ = builder.set_status(600);
        assert_eq!(builder.status(), 404);
    }

    #[test]
    fn test_empty_status_text_rejected() {
        let mut builder = ResponseBuilder::new();
        assert!(matches!(
            builder.set_status_text(""),
            Err(HodosError::EmptyValue { field: "status text" })
        ));
        assert_eq!(builder.status_text(), "OK");
    }

    #[test]
    fn test_empty_header_rejected() {
        let mut builder = ResponseBuilder::new();
        assert!(builder.set_header("", "value").is_err());
        assert!(builder.set_header("x-key", "").is_err());
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let mut builder = ResponseBuilder::new();
        assert!(matches!(
            builder.set_header("bad header", "value"),
            Err(HodosError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let mut builder = ResponseBuilder::new();
        builder.set_header("X-Custom", "one").unwrap();
        builder.set_header("x-custom", "two").unwrap();

        let response = builder.raw(Bytes::new());
        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.headers()["x-custom"], "two");
    }

    #[test]
    fn test_text_finalizer() {
        let response = ResponseBuilder::new().text("hello");
        assert_eq!(response.status(), 200);
        assert_eq!(response.status_text(), "OK");
        assert_eq!(response.content_type(), Some("text/plain"));
        assert_eq!(response.body().as_ref(), b"hello");
    }

    #[test]
    fn test_html_finalizer() {
        let response = ResponseBuilder::new().html("<h1>hi</h1>");
        assert_eq!(response.content_type(), Some("text/html"));
        assert_eq!(response.body().as_ref(), b"<h1>hi</h1>");
    }

    #[test]
    fn test_json_finalizer() {
        let mut builder = ResponseBuilder::new();
        builder.set_status(200).unwrap();

        let response = builder.json(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.body().as_ref(), br#"{"a":1}"#);
    }

    #[test]
    fn test_raw_sets_no_content_type() {
        let response = ResponseBuilder::new().raw(Bytes::from_static(b"bytes"));
        assert_eq!(response.content_type(), None);
        assert_eq!(response.body().as_ref(), b"bytes");
    }

    #[test]
    fn test_raw_preserves_explicit_content_type() {
        let mut builder = ResponseBuilder::new();
        builder.set_header("content-type", "application/octet-stream").unwrap();

        let response = builder.raw(Bytes::from_static(b"\x00\x01"));
        assert_eq!(response.content_type(), Some("application/octet-stream"));
    }

    #[test]
    fn test_finalizers_stamp_over_explicit_content_type() {
        let mut builder = ResponseBuilder::new();
        builder.set_header("content-type", "application/xml").unwrap();

        let response = builder.text("plain now");
        assert_eq!(response.content_type(), Some("text/plain"));
    }

    #[test]
    fn test_finalizers_preserve_accumulated_state() {
        let mut builder = ResponseBuilder::new();
        builder.set_status(418).unwrap();
        builder.set_status_text("I'm a teapot").unwrap();
        builder.set_header("x-pot", "short and stout").unwrap();

        let response = builder.text("no coffee");
        assert_eq!(response.status(), 418);
        assert_eq!(response.status_text(), "I'm a teapot");
        assert_eq!(response.headers()["x-pot"], "short and stout");
    }

    #[test]
    fn test_finalizers_are_idempotent_observers() {
        let mut builder = ResponseBuilder::new();
        builder.set_status(202).unwrap();

        let first = builder.text("one");
        // The builder is untouched by finalizing; later mutations only show
        // up in later finalizer calls.
        builder.set_header("x-extra", "yes").unwrap();
        let second = builder.text("two");

        assert_eq!(first.status(), 202);
        assert!(first.headers().get("x-extra").is_none());
        assert_eq!(second.status(), 202);
        assert_eq!(second.headers()["x-extra"], "yes");
    }

    #[test]
    fn test_with_header() {
        let response = ResponseBuilder::new()
            .text("body")
            .with_header("x-trace", "t1")
            .unwrap();
        assert_eq!(response.headers()["x-trace"], "t1");
        assert!(response.with_header("", "oops").is_err());
    }

    #[test]
    fn test_into_parts() {
        let mut builder = ResponseBuilder::new();
        builder.set_status(204).unwrap();
        builder.set_status_text("No Content").unwrap();

        let (status, status_text, headers, body) = builder.raw(Bytes::new()).into_parts();
        assert_eq!(status, 204);
        assert_eq!(status_text, "No Content");
        assert!(headers.is_empty());
        assert!(body.is_empty());
    }
}
