//! # Hodos Core
//!
//! Core types for the Hodos routing framework:
//!
//! - [`RequestEvent`] - per-request context flowing through middleware and handlers
//! - [`ResponseBuilder`] / [`Response`] - mutable accumulator and finalized response
//! - [`Locals`] / [`ConfigStore`] - request-scoped and application-scoped stores
//! - [`Handler`] - the terminal handler trait
//! - [`HodosError`] - the framework error type

#![doc(html_root_url = "https://docs.rs/hodos-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod event;
mod handler;
mod request;
mod response;
mod store;

pub use error::{HodosError, HodosResult};
pub use event::{RequestEvent, RequestId};
pub use handler::{BoxFuture, Handler};
pub use request::Request;
pub use response::{Response, ResponseBuilder};
pub use store::{ConfigStore, Locals};

// Captured route parameters appear in the public API of `RequestEvent`.
pub use hodos_router::Params;
