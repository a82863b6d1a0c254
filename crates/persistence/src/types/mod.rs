//! Core types for the persistence layer.
//!
//! - [`Rental`] - A rental listing mapped from a result row
//! - [`SearchFilter`], [`GeoPoint`] - The validated search request
//! - [`QueryParams`] - Raw, untyped query parameters
//!
//! # Examples
//!
//! ```
//! use rentals_persistence::types::{QueryParams, SearchFilter};
//!
//! let params = QueryParams::from_pairs([("price_min", "50"), ("sort", "price_asc")]);
//! assert_eq!(params.first("price_min"), Some("50"));
//!
//! let filter = SearchFilter::new().with_price_min(50).with_sort("price_asc");
//! assert_eq!(filter.sort(), Some("price_asc"));
//! ```

mod filter;
mod params;
mod rental;

pub use filter::{GeoPoint, SearchFilter};
pub use params::QueryParams;
pub use rental::{Location, Owner, Rental, RentalPrice};
