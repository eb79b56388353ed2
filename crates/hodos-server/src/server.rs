//! HTTP transport.
//!
//! The server owns a TCP listener and a shared [`App`]. Each accepted
//! connection is served on its own task; each request is collected into a
//! [`Request`], handed to [`App::handle`], and the resulting [`Response`]
//! is converted back to the wire representation.
//!
//! # Example
//!
//! ```rust,ignore
//! use hodos_server::{App, Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = App::new();
//!     // ... register routes ...
//!
//!     let config = ServerConfig::builder().bind_addr("0.0.0.0:8080").build();
//!     Server::new(config, app).run().await?;
//!     Ok(())
//! }
//! ```

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::TcpListener;

use hodos_core::{Request, Response};

use crate::app::App;
use crate::config::ServerConfig;

/// Type alias for the wire-level response body.
pub type ResponseBody = Full<Bytes>;

/// Type alias for the wire-level response.
pub type HttpResponse = hyper::Response<ResponseBody>;

/// Errors from running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured bind address did not parse.
    #[error("invalid bind address '{addr}'")]
    InvalidAddr {
        /// The configured address string.
        addr: String,
        /// The parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// Binding or accepting failed.
    #[error("transport I/O error")]
    Io(#[from] std::io::Error),
}

/// The Hodos HTTP server.
pub struct Server {
    config: ServerConfig,
    app: Arc<App>,
}

impl Server {
    /// Creates a server around a fully-configured application.
    ///
    /// The application is frozen here: registration requires `&mut App`,
    /// and from this point on it is only shared read-only across request
    /// tasks.
    #[must_use]
    pub fn new(config: ServerConfig, app: App) -> Self {
        Self {
            config,
            app: Arc::new(app),
        }
    }

    /// Runs the accept loop. Never returns except on a bind or accept
    /// error.
    pub async fn run(&self) -> Result<(), ServerError> {
        let addr = self.config.socket_addr().map_err(|source| ServerError::InvalidAddr {
            addr: self.config.bind_addr().to_string(),
            source,
        })?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, routes = self.app.route_count(), "server listening");

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let app = Arc::clone(&self.app);
            let timeout = self.config.request_timeout();

            tokio::spawn(async move {
                let io = TokioIo::new(stream);
                let service = service_fn(move |request| {
                    let app = Arc::clone(&app);
                    async move { Ok::<_, Infallible>(serve_request(&app, request, timeout).await) }
                });

                if let Err(error) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::debug!(%remote_addr, error = %error, "connection closed with error");
                }
            });
        }
    }
}

/// Collects the body, hands the request to the application, and converts
/// the outcome to the wire type.
async fn serve_request(
    app: &App,
    request: hyper::Request<Incoming>,
    timeout: Option<Duration>,
) -> HttpResponse {
    let (parts, body) = request.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(error) => {
            tracing::warn!(error = %error, "failed to read request body");
            return plain_response(StatusCode::BAD_REQUEST, "Bad Request");
        }
    };

    let uri = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_string(), |pq| pq.as_str().to_string());
    let request = Request::new(parts.method, uri, parts.headers, body);

    let response = match timeout {
        Some(deadline) => match tokio::time::timeout(deadline, app.handle(request)).await {
            Ok(response) => response,
            Err(_) => {
                tracing::warn!("request exceeded the configured deadline");
                return plain_response(StatusCode::GATEWAY_TIMEOUT, "Gateway Timeout");
            }
        },
        None => app.handle(request).await,
    };

    into_http(response)
}

/// Converts a finalized [`Response`] into the hyper representation.
///
/// The custom status text stays behind on the [`Response`] value: hyper
/// does not emit custom HTTP/1 reason phrases, and HTTP/2 dropped them
/// entirely.
fn into_http(response: Response) -> HttpResponse {
    let (status, _status_text, headers, body) = response.into_parts();
    let mut wire = hyper::Response::new(Full::new(body));
    *wire.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    *wire.headers_mut() = headers;
    wire
}

/// Builds a minimal text response for transport-level failures.
fn plain_response(status: StatusCode, body: &'static str) -> HttpResponse {
    let mut wire = hyper::Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *wire.status_mut() = status;
    wire.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    wire
}
