//! Error types for Hodos.
//!
//! All fallible operations across the framework return [`HodosError`].
//! Every variant is fatal to its call site except [`HodosError::Handler`],
//! which the application context recovers at the dispatch boundary and
//! converts into a generic 500 response.

use hodos_router::PatternError;
use thiserror::Error;

/// Result type alias using [`HodosError`].
pub type HodosResult<T> = Result<T, HodosError>;

/// Standard error type for the Hodos framework.
///
/// # Example
///
/// ```rust
/// use hodos_core::{HodosError, HodosResult};
///
/// fn check_status(code: u16) -> HodosResult<()> {
///     if !(100..=599).contains(&code) {
///         return Err(HodosError::invalid_status(code));
///     }
///     Ok(())
/// }
///
/// assert!(check_status(600).is_err());
/// ```
#[derive(Debug, Error)]
pub enum HodosError {
    /// A route pattern failed to compile at registration time.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A status code outside `100..=599` was set on a response builder.
    #[error("invalid status code {code}: must be within 100..=599")]
    InvalidStatus {
        /// The rejected code.
        code: u16,
    },

    /// An empty value was supplied where a non-empty one is required.
    #[error("{field} must not be empty")]
    EmptyValue {
        /// Which value was empty.
        field: &'static str,
    },

    /// A header name or value was rejected by the HTTP layer.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A config key did not satisfy the uppercase-only convention.
    #[error("config key '{key}' must be uppercase")]
    InvalidConfigKey {
        /// The rejected key.
        key: String,
    },

    /// A response body failed to serialize as JSON.
    #[error("failed to serialize response body")]
    Json(#[from] serde_json::Error),

    /// A middleware or handler failed while processing a request.
    ///
    /// This is the only variant recovered automatically: the application
    /// context logs it and answers with a 500. The underlying error is
    /// never exposed to the client.
    #[error("handler failed: {0}")]
    Handler(#[source] anyhow::Error),
}

impl HodosError {
    /// Creates an invalid-status error.
    #[must_use]
    pub fn invalid_status(code: u16) -> Self {
        Self::InvalidStatus { code }
    }

    /// Creates an empty-value error for the named field.
    #[must_use]
    pub fn empty_value(field: &'static str) -> Self {
        Self::EmptyValue { field }
    }

    /// Creates an invalid-header error.
    #[must_use]
    pub fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid-config-key error.
    #[must_use]
    pub fn invalid_config_key(key: impl Into<String>) -> Self {
        Self::InvalidConfigKey { key: key.into() }
    }

    /// Wraps an arbitrary error raised by a middleware or handler.
    #[must_use]
    pub fn handler(source: impl Into<anyhow::Error>) -> Self {
        Self::Handler(source.into())
    }

    /// Creates a handler error from a plain message.
    #[must_use]
    pub fn handler_message(message: impl Into<String>) -> Self {
        Self::Handler(anyhow::anyhow!(message.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_status_display() {
        let err = HodosError::invalid_status(600);
        assert_eq!(
            err.to_string(),
            "invalid status code 600: must be within 100..=599"
        );
    }

    #[test]
    fn test_empty_value_display() {
        let err = HodosError::empty_value("status text");
        assert_eq!(err.to_string(), "status text must not be empty");
    }

    #[test]
    fn test_invalid_config_key_display() {
        let err = HodosError::invalid_config_key("port");
        assert_eq!(err.to_string(), "config key 'port' must be uppercase");
    }

    #[test]
    fn test_pattern_error_converts() {
        let pattern_err = hodos_router::RoutePattern::compile("").unwrap_err();
        let err: HodosError = pattern_err.into();
        assert!(matches!(err, HodosError::Pattern(_)));
    }

    #[test]
    fn test_handler_message() {
        let err = HodosError::handler_message("boom");
        assert!(matches!(err, HodosError::Handler(_)));
        assert!(err.to_string().contains("boom"));
    }
}
