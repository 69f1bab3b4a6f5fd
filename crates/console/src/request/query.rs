//! Query-string construction for filtered searches.

use std::fmt;

/// Ordered search filters.
///
/// Filters are kept in insertion order. Empty values are never recorded, so an
/// absent filter is omitted entirely and an empty set encodes to an empty
/// string. Values are percent-encoded; keys are fixed identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append `key=value` unless `value` is empty.
    pub fn push_present(&mut self, key: &'static str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.pairs.push((key, value.to_owned()));
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Recorded filters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Value of the filter named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Encode as `k1=v1&k2=v2`: the first filter bare, every later one
    /// prefixed with a single `&`.
    #[must_use]
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 3] = ["price", "sort_by", "order"];

    fn build(values: [&str; 3]) -> String {
        let mut query = QueryParams::new();
        for (key, value) in KEYS.iter().zip(values) {
            query.push_present(key, value);
        }
        query.encode()
    }

    #[test]
    fn test_empty_set_encodes_to_empty_string() {
        assert_eq!(build(["", "", ""]), "");
        assert!(QueryParams::new().is_empty());
    }

    #[test]
    fn test_every_subset_has_single_separators() {
        for mask in 1_u8..8 {
            let values = [0, 1, 2].map(|bit| if mask & (1 << bit) != 0 { "v" } else { "" });
            let encoded = build(values);
            let present = values.iter().filter(|v| !v.is_empty()).count();

            assert!(!encoded.starts_with('&'), "leading separator in {encoded}");
            assert!(!encoded.ends_with('&'), "trailing separator in {encoded}");
            assert!(!encoded.contains("&&"), "doubled separator in {encoded}");
            assert_eq!(encoded.matches('&').count(), present - 1, "{encoded}");

            for (key, value) in KEYS.iter().zip(values) {
                assert_eq!(
                    encoded.contains(&format!("{key}=")),
                    !value.is_empty(),
                    "{key} in {encoded}"
                );
            }
        }
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        assert_eq!(build(["10", "", "desc"]), "price=10&order=desc");
        assert_eq!(build(["", "price", "asc"]), "sort_by=price&order=asc");
    }

    #[test]
    fn test_values_are_escaped() {
        let mut query = QueryParams::new();
        query.push_present("name", "a&b=c d");
        assert_eq!(query.encode(), "name=a%26b%3Dc%20d");
        assert_eq!(query.get("name"), Some("a&b=c d"));
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn test_whitespace_values_are_present() {
        let mut query = QueryParams::new();
        query.push_present("name", " ");
        assert_eq!(query.to_string(), "name=%20");
    }
}
