//! Rental search and lookup handlers.
//!
//! `GET [prefix]/rentals` and `GET [prefix]/rentals/{rental_id}`

use axum::{Json, extract::State};
use rentals_persistence::core::RentalStorage;
use rentals_persistence::types::Rental;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{RentalId, RentalQuery};
use crate::state::AppState;

/// Handler for rental search.
///
/// # HTTP Request
///
/// `GET [prefix]/rentals?price_min=&price_max=&limit=&offset=&ids=&near=&sort=`
///
/// # Response
///
/// - `200 OK` - JSON array of matching rentals
/// - `400 Bad Request` - A query parameter failed validation
/// - `404 Not Found` - No rental matched
/// - `500 Internal Server Error` - The query could not be executed
///
/// # Example
///
/// ```http
/// GET /api/rentals?price_min=50&price_max=200&ids=1,2,3&sort=price_asc HTTP/1.1
/// ```
pub async fn search_handler<S>(
    State(state): State<AppState<S>>,
    RentalQuery(filter): RentalQuery,
) -> RestResult<Json<Vec<Rental>>>
where
    S: RentalStorage + Send + Sync,
{
    debug!(
        price_min = ?filter.price_min(),
        price_max = ?filter.price_max(),
        ids = filter.ids().len(),
        near = ?filter.near(),
        sort = ?filter.sort(),
        limit = ?filter.limit(),
        offset = ?filter.offset(),
        "Processing rental search"
    );

    let rentals = state.storage().search(&filter).await?;

    debug!(count = rentals.len(), "Rental search complete");
    Ok(Json(rentals))
}

/// Handler for reading one rental.
///
/// # HTTP Request
///
/// `GET [prefix]/rentals/{rental_id}`
///
/// # Response
///
/// - `200 OK` - The rental
/// - `400 Bad Request` - `invalid rental ID`
/// - `404 Not Found` - `no rental found`
/// - `500 Internal Server Error` - The query could not be executed
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    RentalId(id): RentalId,
) -> RestResult<Json<Rental>>
where
    S: RentalStorage + Send + Sync,
{
    debug!(id, "Processing rental read");

    let rental = state.storage().read(id).await?;
    Ok(Json(rental))
}
