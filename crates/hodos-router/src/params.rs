//! Captured path parameters.

use smallvec::SmallVec;

/// Captures stored inline before spilling to the heap.
const INLINE_CAPTURES: usize = 4;

/// Named values captured from a matched route pattern.
///
/// Captures are kept in the order the parameters appear in the pattern.
/// Most routes have few parameters, so storage is inline for up to four
/// captures.
///
/// # Example
///
/// ```rust
/// use hodos_router::Params;
///
/// let mut params = Params::new();
/// params.push("id", "42");
///
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    entries: SmallVec<[(String, String); INLINE_CAPTURES]>,
}

impl Params {
    /// Creates an empty capture set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a capture.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the value captured under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of captures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
        assert_eq!(params.get("anything"), None);
    }

    #[test]
    fn test_push_and_get() {
        let mut params = Params::new();
        params.push("org", "acme");
        params.push("user", "42");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("org"), Some("acme"));
        assert_eq!(params.get("user"), Some("42"));
    }

    #[test]
    fn test_iter_preserves_order() {
        let mut params = Params::new();
        params.push("a", "1");
        params.push("b", "2");
        params.push("c", "3");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2"), ("c", "3")]);
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let mut params = Params::new();
        for i in 0..8 {
            params.push(format!("k{i}"), format!("v{i}"));
        }
        assert_eq!(params.len(), 8);
        assert_eq!(params.get("k6"), Some("v6"));
    }
}
