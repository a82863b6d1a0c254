//! Rental identifier extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::RestError;

/// The `{rental_id}` path segment parsed as an integer.
///
/// A segment that is not an integer is rejected with
/// [`RestError::InvalidRentalId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalId(pub i64);

impl RentalId {
    /// Parses a raw path segment.
    pub fn parse(raw: &str) -> Result<Self, RestError> {
        raw.trim()
            .parse::<i64>()
            .map(RentalId)
            .map_err(|_| RestError::InvalidRentalId {
                raw: raw.to_string(),
            })
    }
}

impl<S> FromRequestParts<S> for RentalId
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::InvalidRentalId {
                raw: e.body_text(),
            })?;
        RentalId::parse(&raw)
    }
}
