//! Axum extractors for the rentals API.
//!
//! - [`RentalQuery`] - Validated search filter from the query string
//! - [`RentalId`] - Rental identifier from the path

mod rental_id;
mod rental_query;

pub use rental_id::RentalId;
pub use rental_query::{RentalQuery, parse_query};
