//! Sort key allow-list.
//!
//! The registry maps public sort keys such as `price_asc` to a column and
//! direction. It is the single source of truth for both the validator (which
//! rejects unknown keys) and the compiler (which renders `ORDER BY`).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Suffix used in public sort keys.
    pub fn suffix(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A column and direction to order by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    /// Qualified column, e.g. `r.price_per_day`.
    pub column: String,
    /// Direction.
    pub direction: SortDirection,
}

impl SortOrder {
    /// Creates an ordering.
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction.as_sql())
    }
}

/// Allow-list of sort keys.
///
/// # Examples
///
/// ```
/// use rentals_persistence::search::{SortDirection, SortRegistry};
///
/// let registry = SortRegistry::default();
/// assert!(registry.contains("price_asc"));
/// assert!(!registry.contains("color_asc"));
///
/// let order = registry.resolve(Some("year_desc"));
/// assert_eq!(order.column, "r.vehicle_year");
/// assert_eq!(order.direction, SortDirection::Desc);
///
/// // Absent keys fall back to newest first.
/// assert_eq!(registry.resolve(None).to_string(), "r.created DESC");
/// ```
#[derive(Debug, Clone)]
pub struct SortRegistry {
    orders: HashMap<String, SortOrder>,
    default_order: SortOrder,
}

impl SortRegistry {
    /// Creates a registry with no keys and the given fallback ordering.
    pub fn empty(default_order: SortOrder) -> Self {
        Self {
            orders: HashMap::new(),
            default_order,
        }
    }

    /// Registers `<name>_asc` and `<name>_desc` for a column.
    pub fn register(&mut self, name: &str, column: &str) {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            self.orders.insert(
                format!("{}_{}", name, direction.suffix()),
                SortOrder::new(column, direction),
            );
        }
    }

    /// Builder form of [`SortRegistry::register`].
    pub fn with(mut self, name: &str, column: &str) -> Self {
        self.register(name, column);
        self
    }

    /// Returns true if `key` is an allowed sort key.
    pub fn contains(&self, key: &str) -> bool {
        self.orders.contains_key(key)
    }

    /// Looks up a key.
    pub fn get(&self, key: &str) -> Option<&SortOrder> {
        self.orders.get(key)
    }

    /// Returns the ordering for `key`, or the default ordering when the key
    /// is absent or unknown.
    pub fn resolve(&self, key: Option<&str>) -> &SortOrder {
        key.and_then(|k| self.get(k))
            .unwrap_or(&self.default_order)
    }

    /// Ordering used when no key is given.
    pub fn default_order(&self) -> &SortOrder {
        &self.default_order
    }

    /// Returns all allowed keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.orders.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for SortRegistry {
    /// The standard rental sort keys, newest first by default.
    fn default() -> Self {
        Self::empty(SortOrder::new("r.created", SortDirection::Desc))
            .with("price", "r.price_per_day")
            .with("year", "r.vehicle_year")
            .with("make", "r.vehicle_make")
            .with("model", "r.vehicle_model")
            .with("type", "r.type")
            .with("created", "r.created")
            .with("updated", "r.updated")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_keys() {
        let registry = SortRegistry::default();
        assert_eq!(registry.keys().len(), 14);
        for key in ["price", "year", "make", "model", "type", "created", "updated"] {
            assert!(registry.contains(&format!("{key}_asc")), "{key}_asc");
            assert!(registry.contains(&format!("{key}_desc")), "{key}_desc");
        }
    }

    #[test]
    fn test_keys_are_exact_matches() {
        let registry = SortRegistry::default();
        assert!(!registry.contains("price"));
        assert!(!registry.contains("PRICE_ASC"));
        assert!(!registry.contains("price_asc "));
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        let registry = SortRegistry::default();
        assert_eq!(registry.resolve(Some("nope")), registry.default_order());
        assert_eq!(
            registry.resolve(Some("price_asc")),
            &SortOrder::new("r.price_per_day", SortDirection::Asc)
        );
    }

    #[test]
    fn test_custom_registry() {
        let registry = SortRegistry::empty(SortOrder::new("r.id", SortDirection::Asc))
            .with("sleeps", "r.sleeps");
        assert_eq!(registry.keys(), vec!["sleeps_asc", "sleeps_desc"]);
        assert_eq!(registry.resolve(None).to_string(), "r.id ASC");
    }
}
