//! Route configuration for the rentals API.

pub mod rentals_routes;

pub use rentals_routes::create_routes;
