//! Query-string parsing.

use std::collections::HashMap;

/// Parses the query portion of a URL into a key/value map.
///
/// Pairs are separated by `&` and split on the first `=`; both sides are
/// percent-decoded and `+` decodes as a space. A key with no `=` maps to the
/// empty string. When the same key appears more than once, the last
/// occurrence wins. An empty input yields an empty map, as does a query
/// string that cannot be decoded at all.
///
/// # Example
///
/// ```rust
/// use hodos_router::parse_query;
///
/// let query = parse_query("name=hello%20world&key=123");
/// assert_eq!(query.get("name").map(String::as_str), Some("hello world"));
/// assert_eq!(query.get("key").map(String::as_str), Some("123"));
///
/// assert!(parse_query("").is_empty());
/// ```
#[must_use]
pub fn parse_query(query: &str) -> HashMap<String, String> {
    if query.is_empty() {
        return HashMap::new();
    }

    serde_urlencoded::from_str::<Vec<(String, String)>>(query)
        .map(|pairs| pairs.into_iter().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_decodes_pairs() {
        let query = parse_query("name=hello%20world&key=123");
        assert_eq!(query.len(), 2);
        assert_eq!(query["name"], "hello world");
        assert_eq!(query["key"], "123");
    }

    #[test]
    fn test_plus_decodes_as_space() {
        let query = parse_query("q=rust+lang");
        assert_eq!(query["q"], "rust lang");
    }

    #[test]
    fn test_bare_key_has_empty_value() {
        let query = parse_query("flag");
        assert_eq!(query.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn test_empty_value() {
        let query = parse_query("key=");
        assert_eq!(query.get("key").map(String::as_str), Some(""));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let query = parse_query("k=first&k=second");
        assert_eq!(query["k"], "second");
    }

    #[test]
    fn test_encoded_key() {
        let query = parse_query("user%20name=alice");
        assert_eq!(query["user name"], "alice");
    }
}
