//! Raw query parameters as delivered by an HTTP query string.

use std::collections::HashMap;

/// Parameter name to one-or-more raw string values.
///
/// Values keep the order in which they were supplied; lookups through
/// [`QueryParams::first`] see only the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a parameter set from name/value pairs, keeping repeats.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (name, value) in pairs {
            params.push(name, value);
        }
        params
    }

    /// Appends one value for `name`.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Returns the first non-empty value for `name`.
    ///
    /// Empty values are skipped, so a parameter given only as `name=` is
    /// indistinguishable from an absent one.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|values| values.iter().find(|value| !value.is_empty()))
            .map(String::as_str)
    }

    /// Returns every value supplied for `name`.
    pub fn all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if no parameter was supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, Vec<String>>> for QueryParams {
    fn from(values: HashMap<String, Vec<String>>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let params = QueryParams::from_pairs([("sort", "price_asc"), ("sort", "year_desc")]);
        assert_eq!(params.first("sort"), Some("price_asc"));
        assert_eq!(params.all("sort").len(), 2);
    }

    #[test]
    fn test_empty_value_is_absent() {
        let params = QueryParams::from_pairs([("limit", "")]);
        assert_eq!(params.first("limit"), None);
        assert_eq!(params.first("offset"), None);
        assert!(params.all("offset").is_empty());
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let params = QueryParams::from_pairs([("limit", ""), ("limit", "5"), ("limit", "9")]);
        assert_eq!(params.first("limit"), Some("5"));
    }
}
