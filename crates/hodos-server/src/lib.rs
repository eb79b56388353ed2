//! # Hodos Server
//!
//! Application context and HTTP transport for the Hodos framework.
//!
//! [`App`] is the orchestration layer: route registration, global
//! middleware, the application config store, and the per-request entry
//! point with its 404/500 synthesis. [`Server`] is the transport: a hyper
//! HTTP/1 accept loop that feeds requests into a shared, read-only `App`.

#![doc(html_root_url = "https://docs.rs/hodos-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod app;
pub mod config;
pub mod logging;
pub mod server;

pub use app::App;
pub use config::{ServerConfig, ServerConfigBuilder, DEFAULT_BIND_ADDR};
pub use logging::{init_logging, LogConfig, LoggingError};
pub use server::{HttpResponse, ResponseBody, Server, ServerError};
