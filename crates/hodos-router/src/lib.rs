//! Route matching engine for Hodos.
//!
//! This crate compiles `:name` route patterns, matches them against request
//! paths, parses query strings, and keeps an ordered route table with
//! first-match lookup.
//!
//! # Features
//!
//! - **Pattern compilation**: literal and named-parameter segments, validated
//!   once at registration time
//! - **Strict matching**: equal segment counts, case-sensitive literals, no
//!   trailing-slash normalization
//! - **Parameter capture**: percent-decoded values in declaration order
//! - **Registration-order lookup**: overlapping patterns resolve by insertion
//!   position, not specificity
//!
//! # Example
//!
//! ```rust
//! use hodos_router::RouteTable;
//! use http::Method;
//!
//! let mut table = RouteTable::new();
//! table.register(Method::GET, "/users/:id", "getUser").unwrap();
//!
//! let found = table.lookup(&Method::GET, "/users/42?verbose=1").unwrap();
//! assert_eq!(*found.data, "getUser");
//! assert_eq!(found.params.get("id"), Some("42"));
//! assert_eq!(found.query.get("verbose").map(String::as_str), Some("1"));
//! ```

#![doc(html_root_url = "https://docs.rs/hodos-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod params;
mod pattern;
mod query;
mod table;

pub use params::Params;
pub use pattern::{PatternError, RoutePattern, Segment};
pub use query::parse_query;
pub use table::{Route, RouteMatch, RouteTable};
