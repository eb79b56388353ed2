//! Server configuration types.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use hodos_server::ServerConfig;
//!
//! let config = ServerConfig::builder()
//!     .bind_addr("0.0.0.0:8080")
//!     .request_timeout(Duration::from_secs(30))
//!     .build();
//!
//! assert_eq!(config.bind_addr(), "0.0.0.0:8080");
//! ```

use std::net::SocketAddr;
use std::time::Duration;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Transport configuration.
///
/// Use [`ServerConfig::builder()`] to construct instances.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g. "0.0.0.0:8080").
    bind_addr: String,

    /// Optional deadline for a whole request; an elapsed deadline yields a
    /// 504 without waiting on the pipeline.
    request_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Returns the bind address string.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    /// Parses the bind address as a [`SocketAddr`].
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be parsed.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr.parse()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    bind_addr: String,
    request_timeout: Option<Duration>,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            request_timeout: None,
        }
    }
}

impl ServerConfigBuilder {
    /// Sets the bind address.
    #[must_use]
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind_addr,
            request_timeout: self.request_timeout,
        }
    }
}
