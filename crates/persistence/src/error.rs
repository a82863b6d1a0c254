//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates input validation, resource lookup and
//! backend execution failures.
//!
//! | Category | Raised when | Recoverable by caller |
//! |----------|-------------|-----------------------|
//! | [`ValidationError`] | a search parameter is malformed or out of domain | yes, by correcting input |
//! | [`ResourceError`] | a query ran successfully but matched nothing | yes |
//! | [`BackendError`] | the store failed for a reason unrelated to input | no |

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource lookup errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Search input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns true if the error means "nothing matched".
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Resource(_))
    }
}

/// Errors raised when an executed query matched zero rows.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResourceError {
    /// No rental exists with the requested identifier.
    #[error("rental not found: {id}")]
    NotFound { id: i64 },

    /// A search ran successfully but no rental satisfied the filter.
    #[error("no rental matched the search filter")]
    NoMatches,
}

/// Errors produced while validating raw search parameters.
///
/// Every variant is attributable to exactly one parameter, returned by
/// [`ValidationError::field`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The value could not be parsed as an integer.
    #[error("error parsing {field}: invalid integer '{value}'")]
    InvalidInteger { field: &'static str, value: String },

    /// The value parsed but is below zero.
    #[error("error parsing {field}: value must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: i64 },

    /// One segment of the `ids` list is not an integer.
    #[error("invalid value for ids: '{segment}'")]
    InvalidId { segment: String },

    /// `near` did not contain exactly two coordinates.
    #[error("wrong number of coordinates in near param: expected 2, got {count}")]
    WrongCoordinateCount { count: usize },

    /// One `near` coordinate is not a finite float.
    #[error("invalid value for near: '{value}'")]
    InvalidCoordinate { value: String },

    /// A coordinate is outside its valid range.
    #[error("invalid value for near: {axis} {value} is out of range")]
    CoordinateOutOfRange { axis: &'static str, value: f64 },

    /// The sort key is not on the allow-list.
    #[error("invalid sort value: {value}")]
    InvalidSort { value: String },
}

impl ValidationError {
    /// Returns the name of the query parameter that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidInteger { field, .. }
            | ValidationError::NegativeValue { field, .. } => field,
            ValidationError::InvalidId { .. } => "ids",
            ValidationError::WrongCoordinateCount { .. }
            | ValidationError::InvalidCoordinate { .. }
            | ValidationError::CoordinateOutOfRange { .. } => "near",
            ValidationError::InvalidSort { .. } => "sort",
        }
    }
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// The backend rejected or failed to run a query.
    #[error("query execution failed in {backend_name}: {message}")]
    QueryFailed {
        backend_name: String,
        message: String,
    },

    /// A result row could not be mapped to a rental.
    #[error("failed to map column '{column}': {message}")]
    RowMapping { column: String, message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BackendError {
    /// Creates a [`BackendError::QueryFailed`] for the named backend.
    pub fn query_failed(backend_name: &str, err: impl std::fmt::Display) -> Self {
        BackendError::QueryFailed {
            backend_name: backend_name.to_string(),
            message: err.to_string(),
        }
    }

    /// Creates a [`BackendError::ConnectionFailed`] for the named backend.
    pub fn connection_failed(backend_name: &str, err: impl std::fmt::Display) -> Self {
        BackendError::ConnectionFailed {
            backend_name: backend_name.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_field() {
        let err = ValidationError::InvalidInteger {
            field: "price_min",
            value: "abc".to_string(),
        };
        assert_eq!(err.field(), "price_min");
        assert!(err.to_string().contains("price_min"));
        assert!(err.to_string().contains("abc"));

        let err = ValidationError::InvalidId {
            segment: "x".to_string(),
        };
        assert_eq!(err.field(), "ids");

        let err = ValidationError::WrongCoordinateCount { count: 1 };
        assert_eq!(err.field(), "near");

        let err = ValidationError::InvalidSort {
            value: "color_asc".to_string(),
        };
        assert_eq!(err.field(), "sort");
        assert_eq!(err.to_string(), "invalid sort value: color_asc");
    }

    #[test]
    fn test_storage_error_from_conversions() {
        let err: StorageError = ResourceError::NotFound { id: 7 }.into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "rental not found: 7");

        let err: StorageError = BackendError::query_failed("postgres", "syntax error").into();
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("syntax error"));
    }

    #[test]
    fn test_no_matches_is_not_found() {
        let err = StorageError::from(ResourceError::NoMatches);
        assert!(err.is_not_found());
    }
}
