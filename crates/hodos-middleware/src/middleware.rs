//! Core middleware trait and continuation types.
//!
//! Middleware wrap the remainder of the dispatch chain following the onion
//! model: each one may act before delegating to [`Next`], act on the
//! response after the delegate returns, or skip the delegate entirely and
//! answer on its own.
//!
//! # Example
//!
//! ```rust
//! use hodos_core::{BoxFuture, HodosResult, RequestEvent, Response};
//! use hodos_middleware::{Middleware, Next};
//!
//! struct Tagger;
//!
//! impl Middleware for Tagger {
//!     fn name(&self) -> &'static str {
//!         "tagger"
//!     }
//!
//!     fn handle<'a>(
//!         &'a self,
//!         event: &'a mut RequestEvent,
//!         next: Next<'a>,
//!     ) -> BoxFuture<'a, HodosResult<Response>> {
//!         Box::pin(async move {
//!             let response = next.run(event).await?;
//!             response.with_header("x-tagged", "yes")
//!         })
//!     }
//! }
//! ```

use hodos_core::{BoxFuture, Handler, HodosResult, RequestEvent, Response};

/// An interceptor wrapping the remainder of the dispatch chain.
///
/// # Invariants
///
/// - A middleware delegates to `next` **at most once**; [`Next::run`]
///   consumes the continuation, so the compiler enforces this.
/// - Not calling `next` short-circuits the chain: the handler and every
///   later middleware are skipped, and enclosing middleware see whatever
///   this one returns.
/// - Errors from downstream should be returned as-is unless the middleware
///   deliberately recovers; the application context owns the final
///   error-to-500 conversion.
pub trait Middleware: Send + Sync + 'static {
    /// Returns the unique name of this middleware, used in logs.
    fn name(&self) -> &'static str;

    /// Processes the event, delegating to `next` zero or one times.
    fn handle<'a>(
        &'a self,
        event: &'a mut RequestEvent,
        next: Next<'a>,
    ) -> BoxFuture<'a, HodosResult<Response>>;
}

/// Continuation that dispatches the remainder of the chain.
///
/// Passed to each middleware; invoking [`run`](Self::run) executes the next
/// middleware, or the terminal handler once the chain is exhausted. The
/// value is consumed by `run`, so the continuation cannot fire twice.
pub struct Next<'a> {
    inner: NextInner<'a>,
}

enum NextInner<'a> {
    /// More middleware ahead of the handler.
    Chain {
        middleware: &'a dyn Middleware,
        next: Box<Next<'a>>,
    },
    /// End of chain: the terminal handler.
    Terminal(&'a dyn Handler),
}

impl<'a> Next<'a> {
    /// Creates a link that will invoke `middleware`, then `next`.
    pub(crate) fn chain(middleware: &'a dyn Middleware, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::Chain {
                middleware,
                next: Box::new(next),
            },
        }
    }

    /// Creates the terminal continuation invoking the handler.
    pub(crate) fn terminal(handler: &'a dyn Handler) -> Self {
        Self {
            inner: NextInner::Terminal(handler),
        }
    }

    /// Invokes the next middleware or the terminal handler.
    pub async fn run(self, event: &mut RequestEvent) -> HodosResult<Response> {
        match self.inner {
            NextInner::Chain { middleware, next } => middleware.handle(event, *next).await,
            NextInner::Terminal(handler) => handler.call(event).await,
        }
    }
}

/// Middleware built from a plain function.
///
/// # Example
///
/// ```rust
/// use hodos_core::{BoxFuture, HodosResult, RequestEvent, Response};
/// use hodos_middleware::{FnMiddleware, Next};
///
/// fn pass_through<'a>(
///     event: &'a mut RequestEvent,
///     next: Next<'a>,
/// ) -> BoxFuture<'a, HodosResult<Response>> {
///     Box::pin(async move { next.run(event).await })
/// }
///
/// let middleware = FnMiddleware::new("pass-through", pass_through);
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Creates a function-based middleware with the given name.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: for<'a> Fn(&'a mut RequestEvent, Next<'a>) -> BoxFuture<'a, HodosResult<Response>>
        + Send
        + Sync
        + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle<'a>(
        &'a self,
        event: &'a mut RequestEvent,
        next: Next<'a>,
    ) -> BoxFuture<'a, HodosResult<Response>> {
        (self.func)(event, next)
    }
}
