//! HTTP middleware for the rentals API.
//!
//! - [`options`] - Empty `200 OK` for `OPTIONS` under the API prefix

pub mod options;

pub use options::{OptionsPrefix, options_passthrough};
