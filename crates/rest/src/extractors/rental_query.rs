//! Search filter extractor.
//!
//! Decodes the raw query string into [`QueryParams`] and runs the filter
//! validator against the backend's sort allow-list. A malformed request is
//! rejected here, before the handler runs.

use axum::{extract::FromRequestParts, http::request::Parts};
use rentals_persistence::core::RentalStorage;
use rentals_persistence::search::validate;
use rentals_persistence::types::{QueryParams, SearchFilter};

use crate::error::RestError;
use crate::state::AppState;

/// Axum extractor yielding a validated [`SearchFilter`].
///
/// # Example
///
/// ```rust,ignore
/// use rentals_rest::extractors::RentalQuery;
///
/// async fn handler(RentalQuery(filter): RentalQuery) {
///     println!("limit = {:?}", filter.limit());
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RentalQuery(pub SearchFilter);

impl RentalQuery {
    /// Returns the validated filter.
    pub fn into_inner(self) -> SearchFilter {
        self.0
    }
}

/// Decodes a URL query string into raw parameters.
///
/// Repeated names keep every value in arrival order; `+` and percent escapes
/// are decoded.
pub fn parse_query(query: Option<&str>) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(query) = query {
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.push(name, value);
        }
    }
    params
}

impl<S> FromRequestParts<AppState<S>> for RentalQuery
where
    S: RentalStorage + 'static,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let params = parse_query(parts.uri.query());
        let filter = validate(&params, state.sort_registry()).inspect_err(|e| {
            tracing::debug!(field = e.field(), error = %e, "Rejected search parameters");
        })?;
        Ok(RentalQuery(filter))
    }
}
