//! Content-type-driven body decoding.
//!
//! [`decode`] inspects the `Content-Type` header and turns the raw body
//! bytes into a [`Payload`]. An absent or unrecognized content type is not
//! an error: it simply yields [`Payload::None`], leaving the raw bytes to
//! the caller.

use std::collections::HashMap;
use std::io;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use mime::Mime;
use serde_json::Value;

use crate::error::BodyError;

/// A decoded request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No body, or a content type this module does not decode.
    None,
    /// An `application/json` body.
    Json(Value),
    /// An `application/x-www-form-urlencoded` body.
    Form(HashMap<String, String>),
    /// A `multipart/form-data` body.
    Multipart(Vec<Part>),
}

impl Payload {
    /// Returns the JSON value, if this payload is JSON.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the form fields, if this payload is a form.
    #[must_use]
    pub fn as_form(&self) -> Option<&HashMap<String, String>> {
        match self {
            Self::Form(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the multipart parts, if this payload is multipart.
    #[must_use]
    pub fn as_multipart(&self) -> Option<&[Part]> {
        match self {
            Self::Multipart(parts) => Some(parts),
            _ => None,
        }
    }
}

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// The field name from the part's content disposition.
    pub name: String,
    /// The original filename, for file parts.
    pub filename: Option<String>,
    /// The raw part content.
    pub content: Bytes,
}

/// Decodes `body` according to the request's `Content-Type` header.
///
/// - `application/json` becomes [`Payload::Json`]
/// - `application/x-www-form-urlencoded` becomes [`Payload::Form`]
/// - `multipart/form-data` becomes [`Payload::Multipart`]
/// - anything else, an unparseable content type, or an empty body becomes
///   [`Payload::None`]
///
/// # Errors
///
/// Returns [`BodyError`] when the body does not parse under its declared
/// content type.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use http::header::CONTENT_TYPE;
/// use http::HeaderMap;
/// use hodos_extract::{decode, Payload};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());
///
/// let payload = decode(&headers, &Bytes::from_static(br#"{"a":1}"#))
///     .await
///     .unwrap();
/// assert_eq!(payload.as_json().unwrap()["a"], 1);
/// # }
/// ```
pub async fn decode(headers: &HeaderMap, body: &Bytes) -> Result<Payload, BodyError> {
    if body.is_empty() {
        return Ok(Payload::None);
    }

    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return Ok(Payload::None);
    };
    let Ok(mime) = content_type.parse::<Mime>() else {
        return Ok(Payload::None);
    };

    match (mime.type_(), mime.subtype()) {
        (mime::APPLICATION, mime::JSON) => Ok(Payload::Json(serde_json::from_slice(body)?)),
        (mime::APPLICATION, mime::WWW_FORM_URLENCODED) => {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body.as_ref())?;
            Ok(Payload::Form(pairs.into_iter().collect()))
        }
        (mime::MULTIPART, mime::FORM_DATA) => decode_multipart(content_type, body.clone()).await,
        _ => Ok(Payload::None),
    }
}

async fn decode_multipart(content_type: &str, body: Bytes) -> Result<Payload, BodyError> {
    let boundary =
        multer::parse_boundary(content_type).map_err(|_| BodyError::MissingBoundary)?;

    // The body is already fully read, so feed it as a single-chunk stream.
    let stream = futures_util::stream::once(async move { Ok::<_, io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(ToString::to_string);
        let content = field.bytes().await?;
        parts.push(Part {
            name,
            filename,
            content,
        });
    }

    Ok(Payload::Multipart(parts))
}
