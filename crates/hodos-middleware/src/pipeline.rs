//! Dispatch pipeline.
//!
//! The pipeline owns the global middleware list and, for each request,
//! composes global middleware, the matched route's middleware, and the
//! terminal handler into a single chain. Global middleware run first, then
//! route middleware, each list in its registration order; post-processing
//! unwinds in exact reverse order (onion semantics).

use std::sync::Arc;

use hodos_core::{Handler, HodosResult, RequestEvent, Response};

use crate::middleware::{Middleware, Next};

/// A type-erased middleware that can be stored in a chain.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// The middleware dispatch pipeline.
///
/// Holds the global middleware list, shared by every route. The chain for a
/// request is assembled on the fly by wrapping the terminal handler back to
/// front, so no allocation outlives the dispatch.
///
/// An error from any middleware or the handler aborts the chain and
/// propagates out of [`dispatch`](Self::dispatch) unchanged: enclosing
/// middleware never see a response, and recovery happens exactly once, at
/// the application boundary.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<BoxedMiddleware>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware to the global chain.
    pub fn push<M: Middleware>(&mut self, middleware: M) {
        self.stages.push(Arc::new(middleware));
    }

    /// Appends an already-shared middleware to the global chain.
    pub fn push_shared(&mut self, middleware: BoxedMiddleware) {
        self.stages.push(middleware);
    }

    /// Returns the names of the global middleware in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|m| m.name()).collect()
    }

    /// Returns the number of global middleware.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if no global middleware are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs `event` through the global chain, then `route` middleware, then
    /// the terminal `handler`.
    pub async fn dispatch(
        &self,
        route: &[BoxedMiddleware],
        handler: &dyn Handler,
        event: &mut RequestEvent,
    ) -> HodosResult<Response> {
        tracing::trace!(
            global = self.stages.len(),
            route = route.len(),
            "dispatching middleware chain"
        );

        // Wrap back to front so the first-registered middleware ends up
        // outermost.
        let mut next = Next::terminal(handler);
        for middleware in route.iter().rev() {
            next = Next::chain(middleware.as_ref(), next);
        }
        for middleware in self.stages.iter().rev() {
            next = Next::chain(middleware.as_ref(), next);
        }
        next.run(event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Next;
    use hodos_core::{BoxFuture, ConfigStore, HodosError, Request};
    use serde_json::json;
    use std::collections::HashMap;

    fn make_event() -> RequestEvent {
        RequestEvent::new(
            Request::get("/test"),
            hodos_core::Params::new(),
            HashMap::new(),
            Arc::new(ConfigStore::new()),
        )
    }

    /// Appends its name to the `trace` local on the way in and tags the
    /// response with a header on the way out.
    struct Recorder {
        name: &'static str,
    }

    impl Recorder {
        fn record(event: &mut RequestEvent, entry: &str) {
            let mut trace = event
                .locals()
                .get("trace")
                .and_then(|v| v.as_array().cloned())
                .unwrap_or_default();
            trace.push(json!(entry));
            event.locals_mut().insert("trace", trace);
        }

        fn trace(event: &RequestEvent) -> Vec<String> {
            event
                .locals()
                .get("trace")
                .and_then(|v| v.as_array().cloned())
                .unwrap_or_default()
                .iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect()
        }
    }

    impl Middleware for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn handle<'a>(
            &'a self,
            event: &'a mut RequestEvent,
            next: Next<'a>,
        ) -> BoxFuture<'a, HodosResult<Response>> {
            Box::pin(async move {
                Self::record(event, &format!("{}:before", self.name));
                let response = next.run(event).await?;
                Self::record(event, &format!("{}:after", self.name));
                Ok(response)
            })
        }
    }

    /// Answers on its own without delegating.
    struct ShortCircuit;

    impl Middleware for ShortCircuit {
        fn name(&self) -> &'static str {
            "short-circuit"
        }

        fn handle<'a>(
            &'a self,
            event: &'a mut RequestEvent,
            _next: Next<'a>,
        ) -> BoxFuture<'a, HodosResult<Response>> {
            Box::pin(async move {
                let builder = event.response_mut();
                builder.set_status(403)?;
                Ok(builder.text("denied"))
            })
        }
    }

    /// Fails without producing a response.
    struct Exploder;

    impl Middleware for Exploder {
        fn name(&self) -> &'static str {
            "exploder"
        }

        fn handle<'a>(
            &'a self,
            _event: &'a mut RequestEvent,
            _next: Next<'a>,
        ) -> BoxFuture<'a, HodosResult<Response>> {
            Box::pin(async move { Err(HodosError::handler_message("middleware blew up")) })
        }
    }

    fn handler(event: &mut RequestEvent) -> BoxFuture<'_, HodosResult<Response>> {
        Box::pin(async move {
            Recorder::record(event, "handler");
            Ok(event.response().text("done"))
        })
    }

    fn failing_handler(_event: &mut RequestEvent) -> BoxFuture<'_, HodosResult<Response>> {
        Box::pin(async move { Err(HodosError::handler_message("handler blew up")) })
    }

    #[tokio::test]
    async fn test_onion_ordering() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Recorder { name: "a" });
        pipeline.push(Recorder { name: "b" });

        let mut event = make_event();
        let response = pipeline.dispatch(&[], &handler, &mut event).await.unwrap();

        assert_eq!(response.body().as_ref(), b"done");
        assert_eq!(
            Recorder::trace(&event),
            vec!["a:before", "b:before", "handler", "b:after", "a:after"]
        );
    }

    #[tokio::test]
    async fn test_route_middleware_runs_inside_global() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Recorder { name: "global" });

        let route: Vec<BoxedMiddleware> = vec![Arc::new(Recorder { name: "route" })];

        let mut event = make_event();
        pipeline.dispatch(&route, &handler, &mut event).await.unwrap();

        assert_eq!(
            Recorder::trace(&event),
            vec![
                "global:before",
                "route:before",
                "handler",
                "route:after",
                "global:after"
            ]
        );
    }

    #[tokio::test]
    async fn test_short_circuit_skips_handler_and_later_middleware() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Recorder { name: "outer" });
        pipeline.push(ShortCircuit);
        pipeline.push(Recorder { name: "inner" });

        let mut event = make_event();
        let response = pipeline.dispatch(&[], &handler, &mut event).await.unwrap();

        assert_eq!(response.status(), 403);
        assert_eq!(response.body().as_ref(), b"denied");
        // "outer" already ran on the way in and still unwinds; "inner" and
        // the handler never run.
        assert_eq!(Recorder::trace(&event), vec!["outer:before", "outer:after"]);
    }

    #[tokio::test]
    async fn test_handler_error_propagates_past_post_processing() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Recorder { name: "outer" });

        let mut event = make_event();
        let result = pipeline.dispatch(&[], &failing_handler, &mut event).await;

        assert!(matches!(result, Err(HodosError::Handler(_))));
        // The error propagates before any response exists, so "outer" never
        // records its after-step.
        assert_eq!(Recorder::trace(&event), vec!["outer:before"]);
    }

    #[tokio::test]
    async fn test_middleware_error_propagates() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Exploder);

        let mut event = make_event();
        let result = pipeline.dispatch(&[], &handler, &mut event).await;

        assert!(result.is_err());
        assert!(Recorder::trace(&event).is_empty());
    }

    #[tokio::test]
    async fn test_empty_pipeline_runs_handler_directly() {
        let pipeline = Pipeline::new();
        let mut event = make_event();

        let response = pipeline.dispatch(&[], &handler, &mut event).await.unwrap();
        assert_eq!(response.body().as_ref(), b"done");
        assert_eq!(Recorder::trace(&event), vec!["handler"]);
    }

    #[test]
    fn test_stage_names() {
        let mut pipeline = Pipeline::new();
        assert!(pipeline.is_empty());

        pipeline.push(Recorder { name: "a" });
        pipeline.push(ShortCircuit);

        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.stage_names(), vec!["a", "short-circuit"]);
    }
}
