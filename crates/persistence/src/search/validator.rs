//! Search parameter validation.
//!
//! Converts raw query parameters into a [`SearchFilter`]. Validation is
//! fail-fast in the order `price_min`, `price_max`, `limit`, `offset`, `ids`,
//! `near`, `sort`; the first failing parameter is reported.

use crate::error::ValidationError;
use crate::types::{GeoPoint, QueryParams, SearchFilter};

use super::sort::SortRegistry;

/// Validates raw query parameters against the given sort allow-list.
///
/// Repeated parameters use their first value and empty values count as
/// absent. Unknown parameters are ignored.
///
/// # Examples
///
/// ```
/// use rentals_persistence::search::{validate, SortRegistry};
/// use rentals_persistence::types::{GeoPoint, QueryParams};
///
/// let sorts = SortRegistry::default();
///
/// let params = QueryParams::from_pairs([("near", "40.0,-75.0")]);
/// let filter = validate(&params, &sorts).unwrap();
/// assert_eq!(filter.near(), Some(GeoPoint::new(40.0, -75.0)));
///
/// let params = QueryParams::from_pairs([("near", "40.0")]);
/// assert!(validate(&params, &sorts).is_err());
/// ```
pub fn validate(params: &QueryParams, sorts: &SortRegistry) -> Result<SearchFilter, ValidationError> {
    let mut filter = SearchFilter::new();

    if let Some(value) = non_negative(params, "price_min")? {
        filter = filter.with_price_min(value);
    }
    if let Some(value) = non_negative(params, "price_max")? {
        filter = filter.with_price_max(value);
    }
    if let Some(value) = non_negative(params, "limit")? {
        filter = filter.with_limit(value);
    }
    if let Some(value) = non_negative(params, "offset")? {
        filter = filter.with_offset(value);
    }

    if let Some(raw) = params.first("ids") {
        filter = filter.with_ids(parse_ids(raw)?);
    }

    if let Some(raw) = params.first("near") {
        filter = filter.with_near(parse_near(raw)?);
    }

    if let Some(raw) = params.first("sort") {
        if !sorts.contains(raw) {
            return Err(ValidationError::InvalidSort {
                value: raw.to_string(),
            });
        }
        filter = filter.with_sort(raw);
    }

    Ok(filter)
}

fn non_negative(params: &QueryParams, field: &'static str) -> Result<Option<u64>, ValidationError> {
    let Some(raw) = params.first(field) else {
        return Ok(None);
    };

    let value: i64 = raw.parse().map_err(|_| ValidationError::InvalidInteger {
        field,
        value: raw.to_string(),
    })?;

    u64::try_from(value)
        .map(Some)
        .map_err(|_| ValidationError::NegativeValue { field, value })
}

fn parse_ids(raw: &str) -> Result<Vec<i64>, ValidationError> {
    raw.split(',')
        .map(|segment| {
            segment
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidId {
                    segment: segment.to_string(),
                })
        })
        .collect()
}

fn parse_near(raw: &str) -> Result<GeoPoint, ValidationError> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        return Err(ValidationError::WrongCoordinateCount { count: parts.len() });
    }

    let lat = parse_coordinate(parts[0])?;
    let lng = parse_coordinate(parts[1])?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::CoordinateOutOfRange {
            axis: "latitude",
            value: lat,
        });
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(ValidationError::CoordinateOutOfRange {
            axis: "longitude",
            value: lng,
        });
    }

    Ok(GeoPoint::new(lat, lng))
}

fn parse_coordinate(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ValidationError::InvalidCoordinate {
            value: raw.to_string(),
        })
}
