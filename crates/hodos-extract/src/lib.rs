//! # Hodos Extract
//!
//! Request body decoding for the Hodos framework.
//!
//! This crate is the thin format-specific collaborator the routing layer
//! delegates to: given a `Content-Type` header and the raw body bytes,
//! [`decode`] produces a structured [`Payload`] for JSON, URL-encoded form,
//! and multipart bodies. Everything else passes through as
//! [`Payload::None`] with the raw bytes left to the caller.

#![doc(html_root_url = "https://docs.rs/hodos-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod error;

pub use body::{decode, Part, Payload};
pub use error::BodyError;
