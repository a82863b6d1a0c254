//! Rentals route configuration.

use axum::{Router, middleware::from_fn_with_state, routing::get};
use rentals_persistence::core::RentalStorage;

use crate::handlers;
use crate::middleware::{OptionsPrefix, options_passthrough};
use crate::state::AppState;

/// Creates all rentals API routes.
///
/// # Routes
///
/// - `GET {prefix}/rentals` - Search
/// - `GET {prefix}/rentals/{rental_id}` - Read
/// - `OPTIONS {prefix}/*` - Empty 200
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: RentalStorage + Send + Sync + 'static,
{
    let config = state.config();
    let rentals_path = config.rentals_path();
    let rental_path = format!("{}/{{rental_id}}", rentals_path);
    let prefix = OptionsPrefix::new(&config.api_prefix);

    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        .route(&rentals_path, get(handlers::search_handler::<S>))
        .route(&rental_path, get(handlers::read_handler::<S>))
        .layer(from_fn_with_state(prefix, options_passthrough))
        .with_state(state)
}
