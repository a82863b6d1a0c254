//! The validated search request.

use serde::{Deserialize, Serialize};

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude, in [-90, 90].
    pub lat: f64,
    /// Longitude, in [-180, 180].
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A typed rental search request.
///
/// Every field is optional and each one contributes an independent clause to
/// the compiled query. Values held here have already passed type and domain
/// checks, so the compiler only looks at whether a field is present.
///
/// # Examples
///
/// ```
/// use rentals_persistence::types::{GeoPoint, SearchFilter};
///
/// let filter = SearchFilter::new()
///     .with_price_min(50)
///     .with_price_max(200)
///     .with_ids(vec![1, 2, 3])
///     .with_near(GeoPoint::new(40.0, -75.0))
///     .with_sort("price_asc");
///
/// assert_eq!(filter.price_min(), Some(50));
/// assert_eq!(filter.ids(), &[1, 2, 3]);
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    price_min: Option<u64>,
    price_max: Option<u64>,
    limit: Option<u64>,
    offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ids: Vec<i64>,
    near: Option<GeoPoint>,
    sort: Option<String>,
}

impl SearchFilter {
    /// Creates an empty filter matching every rental.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lower bound on the daily price.
    pub fn with_price_min(mut self, price: u64) -> Self {
        self.price_min = Some(price);
        self
    }

    /// Sets the upper bound on the daily price.
    pub fn with_price_max(mut self, price: u64) -> Self {
        self.price_max = Some(price);
        self
    }

    /// Sets the maximum number of rentals returned.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the number of rentals skipped.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Restricts matches to the given identifiers. An empty list means no restriction.
    pub fn with_ids(mut self, ids: Vec<i64>) -> Self {
        self.ids = ids;
        self
    }

    /// Restricts matches to rentals near a point.
    pub fn with_near(mut self, point: GeoPoint) -> Self {
        self.near = Some(point);
        self
    }

    /// Sets the sort key.
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Lower price bound.
    pub fn price_min(&self) -> Option<u64> {
        self.price_min
    }

    /// Upper price bound.
    pub fn price_max(&self) -> Option<u64> {
        self.price_max
    }

    /// Maximum number of results.
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Number of results skipped.
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Identifiers to match; empty when unrestricted.
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    /// Center of the radius search.
    pub fn near(&self) -> Option<GeoPoint> {
        self.near
    }

    /// Sort key, already checked against the allow-list.
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let filter = SearchFilter::new();
        assert!(filter.is_empty());
        assert!(filter.ids().is_empty());
        assert_eq!(filter.sort(), None);
    }

    #[test]
    fn test_empty_ids_keep_filter_empty() {
        let filter = SearchFilter::new().with_ids(Vec::new());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_builder_sets_fields() {
        let filter = SearchFilter::new().with_limit(10).with_offset(20);
        assert_eq!(filter.limit(), Some(10));
        assert_eq!(filter.offset(), Some(20));
        assert!(filter.near().is_none());
        assert!(!filter.is_empty());
    }
}
