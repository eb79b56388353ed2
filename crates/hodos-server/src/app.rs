//! Application context.
//!
//! [`App`] orchestrates the routing layer: it owns the route table, the
//! global middleware pipeline, and the application config store, and it is
//! the per-request entry point the transport calls into.
//!
//! All registration happens during a setup phase through `&mut self`; once
//! the transport starts serving, the application is shared read-only across
//! request tasks and [`handle`](App::handle) only ever takes `&self`.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use serde_json::Value;

use hodos_core::{
    ConfigStore, Handler, HodosResult, Request, RequestEvent, Response, ResponseBuilder,
};
use hodos_middleware::{BoxedMiddleware, Middleware, Pipeline};
use hodos_router::RouteTable;

/// A registered endpoint: the terminal handler plus its route-scoped
/// middleware, in registration order.
struct Endpoint {
    handler: Arc<dyn Handler>,
    middleware: Vec<BoxedMiddleware>,
}

/// The application context.
///
/// # Example
///
/// ```rust
/// use hodos_core::{BoxFuture, HodosResult, Request, RequestEvent, Response};
/// use hodos_server::App;
///
/// fn get_user(event: &mut RequestEvent) -> BoxFuture<'_, HodosResult<Response>> {
///     Box::pin(async move {
///         let id = event.param("id").unwrap_or("unknown").to_string();
///         event.response().json(&serde_json::json!({ "id": id }))
///     })
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut app = App::new();
/// app.get("/users/:id", get_user).unwrap();
///
/// let response = app.handle(Request::get("/users/42")).await;
/// assert_eq!(response.status(), 200);
/// # }
/// ```
pub struct App {
    routes: RouteTable<Endpoint>,
    pipeline: Pipeline,
    config: Arc<ConfigStore>,
}

impl App {
    /// Creates an application with no routes, middleware, or config.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: RouteTable::new(),
            pipeline: Pipeline::new(),
            config: Arc::new(ConfigStore::new()),
        }
    }

    /// Registers a route with per-route middleware.
    ///
    /// Route middleware run after every global middleware, in the order
    /// given here. The pattern is compiled immediately.
    ///
    /// # Errors
    ///
    /// Returns [`hodos_router::PatternError`] (as `HodosError`) if the
    /// pattern does not compile.
    pub fn route(
        &mut self,
        method: Method,
        path: &str,
        handler: impl Handler,
        middleware: Vec<BoxedMiddleware>,
    ) -> HodosResult<&mut Self> {
        let endpoint = Endpoint {
            handler: Arc::new(handler),
            middleware,
        };
        self.routes.register(method, path, endpoint)?;
        Ok(self)
    }

    /// Registers a GET route.
    pub fn get(&mut self, path: &str, handler: impl Handler) -> HodosResult<&mut Self> {
        self.route(Method::GET, path, handler, Vec::new())
    }

    /// Registers a POST route.
    pub fn post(&mut self, path: &str, handler: impl Handler) -> HodosResult<&mut Self> {
        self.route(Method::POST, path, handler, Vec::new())
    }

    /// Registers a PUT route.
    pub fn put(&mut self, path: &str, handler: impl Handler) -> HodosResult<&mut Self> {
        self.route(Method::PUT, path, handler, Vec::new())
    }

    /// Registers a PATCH route.
    pub fn patch(&mut self, path: &str, handler: impl Handler) -> HodosResult<&mut Self> {
        self.route(Method::PATCH, path, handler, Vec::new())
    }

    /// Registers a DELETE route.
    pub fn delete(&mut self, path: &str, handler: impl Handler) -> HodosResult<&mut Self> {
        self.route(Method::DELETE, path, handler, Vec::new())
    }

    /// Appends a middleware to the global chain shared by all routes.
    pub fn use_middleware(&mut self, middleware: impl Middleware) -> &mut Self {
        self.pipeline.push(middleware);
        self
    }

    /// Merges settings into the application config store.
    ///
    /// Keys follow the uppercase convention; validation is all-or-nothing,
    /// so a rejected key leaves the store untouched. Call this during
    /// setup only; the store is read-only once serving starts.
    ///
    /// # Errors
    ///
    /// Returns [`hodos_core::HodosError::InvalidConfigKey`] for the first
    /// offending key.
    pub fn config(&mut self, entries: HashMap<String, Value>) -> HodosResult<&mut Self> {
        Arc::make_mut(&mut self.config).merge(entries)?;
        Ok(self)
    }

    /// Returns the application config store.
    #[must_use]
    pub fn config_store(&self) -> &ConfigStore {
        &self.config
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Handles one request: the per-request entry point.
    ///
    /// Looks the URL up in the route table; on a match, builds a fresh
    /// [`RequestEvent`] and runs the dispatch pipeline. A missing route
    /// becomes a synthesized 404 without invoking any handler or
    /// middleware. A pipeline error is logged and becomes a generic 500;
    /// this is the single error-recovery boundary, so no partial response
    /// state ever reaches the transport.
    pub async fn handle(&self, request: Request) -> Response {
        let Some(found) = self.routes.lookup(request.method(), request.uri()) else {
            tracing::debug!(method = %request.method(), uri = %request.uri(), "no route matched");
            return Self::not_found();
        };

        let mut event = RequestEvent::new(request, found.params, found.query, Arc::clone(&self.config));
        match self
            .pipeline
            .dispatch(&found.data.middleware, found.data.handler.as_ref(), &mut event)
            .await
        {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(request_id = %event.id(), error = %error, "request pipeline failed");
                Self::internal_error()
            }
        }
    }

    /// Synthesizes the 404 answered when no route matches.
    fn not_found() -> Response {
        let mut builder = ResponseBuilder::new();
        builder.set_status(404).expect("404 is a valid status code");
        builder
            .set_status_text("Not Found")
            .expect("status text is non-empty");
        builder.text("Not Found")
    }

    /// Synthesizes the 500 answered when the pipeline fails.
    fn internal_error() -> Response {
        let mut builder = ResponseBuilder::new();
        builder.set_status(500).expect("500 is a valid status code");
        builder
            .set_status_text("Internal Server Error")
            .expect("status text is non-empty");
        builder.text("Internal Server Error")
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hodos_core::{BoxFuture, HodosError};
    use serde_json::json;

    fn pong(event: &mut RequestEvent) -> BoxFuture<'_, HodosResult<Response>> {
        Box::pin(async move { Ok(event.response().text("pong")) })
    }

    #[tokio::test]
    async fn test_basic_route() {
        let mut app = App::new();
        app.get("/ping", pong).unwrap();

        let response = app.handle(Request::get("/ping")).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.body().as_ref(), b"pong");
    }

    #[tokio::test]
    async fn test_unregistered_path_is_404() {
        let app = App::new();
        let response = app.handle(Request::get("/missing")).await;

        assert_eq!(response.status(), 404);
        assert_eq!(response.status_text(), "Not Found");
        assert_eq!(response.content_type(), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_method_mismatch_is_404() {
        let mut app = App::new();
        app.get("/ping", pong).unwrap();

        let response = app
            .handle(Request::post("/ping", bytes::Bytes::new()))
            .await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_handler_error_is_500() {
        fn explode(_event: &mut RequestEvent) -> BoxFuture<'_, HodosResult<Response>> {
            Box::pin(async move { Err(HodosError::handler_message("secret detail")) })
        }

        let mut app = App::new();
        app.get("/explode", explode).unwrap();

        let response = app.handle(Request::get("/explode")).await;
        assert_eq!(response.status(), 500);
        assert_eq!(response.status_text(), "Internal Server Error");
        // The original error never leaks to the client.
        assert_eq!(response.body().as_ref(), b"Internal Server Error");
    }

    #[tokio::test]
    async fn test_registration_returns_pattern_error() {
        let mut app = App::new();
        let result = app.get("/users/:", pong);
        assert!(matches!(result, Err(HodosError::Pattern(_))));
        assert_eq!(app.route_count(), 0);
    }

    #[tokio::test]
    async fn test_config_merge_and_read() {
        let mut app = App::new();
        app.config(HashMap::from([("APP_NAME".to_string(), json!("demo"))]))
            .unwrap();

        assert_eq!(app.config_store().get("APP_NAME"), Some(&json!("demo")));

        let result = app.config(HashMap::from([("bad_key".to_string(), json!(1))]));
        assert!(matches!(result, Err(HodosError::InvalidConfigKey { .. })));
        // All-or-nothing: the earlier key is still the only one present.
        assert_eq!(app.config_store().len(), 1);
    }
}
