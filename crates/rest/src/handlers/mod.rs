//! HTTP request handlers.
//!
//! - [`rentals`] - Rental search and read
//! - [`health`] - Health, liveness and readiness probes

pub mod health;
pub mod rentals;

pub use health::{health_handler, liveness_handler, readiness_handler};
pub use rentals::{read_handler, search_handler};
