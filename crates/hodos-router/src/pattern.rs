//! Route pattern compilation and matching.
//!
//! A route pattern is a path template made of literal segments and named
//! parameter segments (`:name`). Patterns are compiled once at registration
//! time into a [`RoutePattern`] that can be matched against concrete paths.

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::params::Params;

/// Errors raised while compiling a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern string was empty.
    #[error("route pattern must not be empty")]
    Empty,

    /// A segment consisted of a bare `:` with no parameter name.
    #[error("route pattern '{pattern}' contains a parameter with no name")]
    EmptyParamName {
        /// The offending pattern string.
        pattern: String,
    },

    /// The same parameter name appeared in more than one segment.
    #[error("route pattern '{pattern}' declares parameter ':{name}' more than once")]
    DuplicateParam {
        /// The offending pattern string.
        pattern: String,
        /// The repeated parameter name.
        name: String,
    },
}

/// One segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A literal segment, compared byte-for-byte and case-sensitively.
    Literal(String),

    /// A named parameter segment, capturing exactly one non-empty path segment.
    Param(String),
}

/// A compiled route pattern.
///
/// Matching is strict: the pattern and the candidate path must have the same
/// number of `/`-separated segments. `/test` and `/test/` are distinct paths,
/// and `/test/:id` never matches a bare `/test`. Captured parameter values
/// are percent-decoded; literal segments are compared as written.
///
/// # Example
///
/// ```rust
/// use hodos_router::RoutePattern;
///
/// let pattern = RoutePattern::compile("/users/:id/posts/:post").unwrap();
///
/// let params = pattern.matches("/users/42/posts/7").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.get("post"), Some("7"));
///
/// assert!(pattern.matches("/users/42/posts").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compiles a pattern string into a matcher.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern is empty, contains a bare `:`
    /// segment, or declares the same parameter name twice.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }

        let mut segments = Vec::new();
        for raw in split_segments(pattern) {
            if let Some(name) = raw.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::EmptyParamName {
                        pattern: pattern.to_string(),
                    });
                }
                let duplicate = segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                if duplicate {
                    return Err(PatternError::DuplicateParam {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal(raw.to_string()));
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// Tests a concrete path against this pattern.
    ///
    /// Returns the captured parameters on a full match (an empty [`Params`]
    /// if the pattern has no named segments), or `None` on the first
    /// mismatch. Segment counts must be equal; there is no trailing-slash
    /// leniency.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        let candidate = split_segments(path);
        if candidate.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(candidate) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    let value = percent_decode_str(part).decode_utf8_lossy().into_owned();
                    params.push(name.clone(), value);
                }
            }
        }

        Some(params)
    }

    /// Returns the parameter names in the order they appear in the pattern.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns the original pattern string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the compiled segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Splits a path or pattern on `/`, discarding only the empty segment
/// produced by a leading slash. A trailing slash yields a trailing empty
/// segment, which is what keeps `/test` and `/test/` distinct.
fn split_segments(path: &str) -> Vec<&str> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() {
        Vec::new()
    } else {
        rest.split('/').collect()
    }
}
