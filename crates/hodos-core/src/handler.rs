//! Handler trait for terminal request processing.

use std::future::Future;
use std::pin::Pin;

use crate::error::HodosResult;
use crate::event::RequestEvent;
use crate::response::Response;

/// A boxed future, the return shape of handlers and middleware.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The terminal request handler at the end of a middleware chain.
///
/// Handlers receive the mutable [`RequestEvent`] and produce a finalized
/// [`Response`], usually through the event's response builder. An `Err`
/// propagates out of the dispatch pipeline and is converted to a 500 at the
/// application boundary.
///
/// Plain functions returning a boxed future implement this trait directly:
///
/// ```rust
/// use hodos_core::{BoxFuture, Handler, HodosResult, RequestEvent, Response};
///
/// fn hello(event: &mut RequestEvent) -> BoxFuture<'_, HodosResult<Response>> {
///     Box::pin(async move { Ok(event.response().text("hello")) })
/// }
///
/// fn assert_handler(_: impl Handler) {}
/// assert_handler(hello);
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Processes the event and produces a response.
    fn call<'a>(&'a self, event: &'a mut RequestEvent) -> BoxFuture<'a, HodosResult<Response>>;
}

impl<F> Handler for F
where
    F: for<'a> Fn(&'a mut RequestEvent) -> BoxFuture<'a, HodosResult<Response>>
        + Send
        + Sync
        + 'static,
{
    fn call<'a>(&'a self, event: &'a mut RequestEvent) -> BoxFuture<'a, HodosResult<Response>> {
        self(event)
    }
}
