//! # Hodos Middleware
//!
//! Middleware dispatch pipeline for the Hodos framework.
//!
//! Middleware follow the onion execution model: each interceptor wraps the
//! remainder of the chain and may act before the inner call, after it, or
//! instead of it.
//!
//! ```text
//! Request → global #1 → global #2 → route #1 → handler
//!                                                 ↓
//! Response ← global #1 ← global #2 ← route #1 ←──┘
//! ```
//!
//! The chain for a request is the global middleware list followed by the
//! matched route's middleware, each in registration order. A middleware
//! that never invokes its [`Next`] continuation short-circuits the chain.
//! Errors propagate outward untouched; the application context converts
//! them to a 500 at its boundary.

#![doc(html_root_url = "https://docs.rs/hodos-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod middleware;
pub mod pipeline;

pub use middleware::{FnMiddleware, Middleware, Next};
pub use pipeline::{BoxedMiddleware, Pipeline};
