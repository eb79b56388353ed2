//! Body decoding error types.

use thiserror::Error;

/// Errors produced while decoding a request body.
#[derive(Debug, Error)]
pub enum BodyError {
    /// The body was declared JSON but did not parse.
    #[error("invalid JSON body")]
    Json(#[from] serde_json::Error),

    /// The body was declared URL-encoded but did not parse.
    #[error("invalid form body")]
    Form(#[from] serde_urlencoded::de::Error),

    /// The multipart body was malformed.
    #[error("invalid multipart body")]
    Multipart(#[from] multer::Error),

    /// The multipart content type carried no boundary parameter.
    #[error("multipart content type is missing a boundary")]
    MissingBoundary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_converts() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: BodyError = source.into();
        assert!(matches!(err, BodyError::Json(_)));
        assert_eq!(err.to_string(), "invalid JSON body");
    }

    #[test]
    fn test_missing_boundary_display() {
        assert_eq!(
            BodyError::MissingBoundary.to_string(),
            "multipart content type is missing a boundary"
        );
    }
}
