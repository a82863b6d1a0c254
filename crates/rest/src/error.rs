//! Error types for the rentals REST API.
//!
//! Every error renders as a JSON body of the form `{"error": "<message>"}`
//! with the matching HTTP status code.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rentals_persistence::error::{BackendError, ResourceError, StorageError, ValidationError};

/// Message returned when a search or lookup matched nothing.
pub const NOT_FOUND_MESSAGE: &str = "no rental found";

/// Message returned when the rental id path segment is not an integer.
pub const INVALID_ID_MESSAGE: &str = "invalid rental ID";

/// Errors produced by the REST layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestError {
    /// The request was malformed (400).
    BadRequest {
        /// Details about what was wrong.
        message: String,
    },

    /// The rental id in the path could not be parsed (400).
    InvalidRentalId {
        /// The raw path segment.
        raw: String,
    },

    /// No rental matched (404).
    NotFound,

    /// The store failed its readiness ping (503).
    ServiceUnavailable {
        /// Details about the failure.
        message: String,
    },

    /// Query execution or row mapping failed (500).
    InternalError {
        /// Details about the failure.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } | RestError::InvalidRentalId { .. } => {
                StatusCode::BAD_REQUEST
            }
            RestError::NotFound => StatusCode::NOT_FOUND,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message placed in the response body.
    ///
    /// Internal failures are not echoed to clients; their details are logged.
    pub fn client_message(&self) -> String {
        match self {
            RestError::BadRequest { message } => message.clone(),
            RestError::InvalidRentalId { .. } => INVALID_ID_MESSAGE.to_string(),
            RestError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            RestError::ServiceUnavailable { .. } => "storage unavailable".to_string(),
            RestError::InternalError { .. } => "internal server error".to_string(),
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::InvalidRentalId { raw } => write!(f, "Invalid rental ID: {}", raw),
            RestError::NotFound => write!(f, "No rental found"),
            RestError::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {}", message)
            }
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = serde_json::json!({ "error": self.client_message() });
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Validation(e) => e.into(),
            StorageError::Resource(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(_: ResourceError) -> Self {
        RestError::NotFound
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
