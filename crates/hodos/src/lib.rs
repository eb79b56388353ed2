//! # Hodos
//!
//! **A minimal HTTP request-routing layer with onion middleware**
//!
//! Hodos maps an incoming `(method, path)` pair to a registered handler,
//! extracts path and query parameters, and runs a chain of middleware
//! around the handler before producing a response:
//!
//! - **Pattern routes** – literal and `:name` segments, compiled once at
//!   registration
//! - **Registration-order matching** – overlapping routes resolve by
//!   insertion position, no specificity heuristics
//! - **Onion middleware** – global and per-route interceptors that act
//!   before, after, or instead of the handler
//! - **One error boundary** – pipeline failures become a generic 500 at the
//!   application context, never a partial response
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hodos::prelude::*;
//!
//! fn hello(event: &mut RequestEvent) -> BoxFuture<'_, HodosResult<Response>> {
//!     Box::pin(async move {
//!         let name = event.param("name").unwrap_or("world").to_string();
//!         Ok(event.response().text(format!("hello, {name}")))
//!     })
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = App::new();
//!     app.get("/hello/:name", hello)?;
//!
//!     let config = ServerConfig::builder().bind_addr("0.0.0.0:8080").build();
//!     Server::new(config, app).run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! transport → App → RouteTable lookup → RequestEvent
//!                         │                  │
//!                      no match          Pipeline: global → route → handler
//!                         │                  │
//!                        404            Response (or 500 on error)
//! ```

#![doc(html_root_url = "https://docs.rs/hodos/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use hodos_core as core;

// Re-export the routing engine
pub use hodos_router as router;

// Re-export the middleware pipeline
pub use hodos_middleware as middleware;

// Re-export body decoding
pub use hodos_extract as extract;

// Re-export the application context and transport
pub use hodos_server as server;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use hodos::prelude::*;
///
/// let app = App::new();
/// assert_eq!(app.route_count(), 0);
/// ```
pub mod prelude {
    pub use hodos_core::{
        BoxFuture, ConfigStore, Handler, HodosError, HodosResult, Locals, Params, Request,
        RequestEvent, RequestId, Response, ResponseBuilder,
    };

    // Routing types
    pub use hodos_router::{parse_query, PatternError, RoutePattern, RouteTable};

    // Middleware types
    pub use hodos_middleware::{BoxedMiddleware, FnMiddleware, Middleware, Next, Pipeline};

    // Body decoding
    pub use hodos_extract::{decode, BodyError, Part, Payload};

    // Application and transport
    pub use hodos_server::{App, LogConfig, Server, ServerConfig};

    // HTTP method re-export, used by `App::route`
    pub use http::Method;
}
