//! Structured logging setup.
//!
//! Thin wrapper over the tracing-subscriber ecosystem: JSON output for
//! production, human-readable output for development.
//!
//! # Example
//!
//! ```rust,ignore
//! use hodos_server::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default())?;
//! tracing::info!(addr = "0.0.0.0:8080", "starting");
//! ```

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive (e.g. "info", "hodos_server=debug").
    pub level: String,

    /// Whether to emit JSON-formatted lines.
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
        }
    }
}

impl LogConfig {
    /// Development configuration: debug level, human-readable output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
        }
    }
}

/// Errors from logger initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive did not parse.
    #[error("invalid log filter '{0}'")]
    InvalidFilter(String),

    /// A global subscriber was already installed.
    #[error("logger already initialized")]
    AlreadyInitialized,
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`LoggingError`] if the filter directive is invalid or a global
/// subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|_| LoggingError::InvalidFilter(config.level.clone()))?;

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_format {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)
    }
}
