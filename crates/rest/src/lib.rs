//! # rentals-rest - Rental listings HTTP API
//!
//! An axum application exposing rental listings stored behind a
//! [`RentalStorage`] backend. Query parameters are validated into a typed
//! search filter before any SQL is compiled; an invalid request never reaches
//! the store.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rentals_rest::{create_app, ServerConfig};
//! use rentals_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("rentals.db")?;
//!     backend.init_schema()?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | search | GET | `/api/rentals?params` |
//! | read | GET | `/api/rentals/{rental_id}` |
//! | preflight | OPTIONS | `/api/*` |
//! | health | GET | `/health`, `/_liveness`, `/_readiness` |
//!
//! ## Search Parameters
//!
//! | Name | Example | Meaning |
//! |------|---------|---------|
//! | `price_min`, `price_max` | `50` | Inclusive bounds on the daily price |
//! | `limit`, `offset` | `10` | Pagination window; `0` means not set |
//! | `ids` | `1,2,3` | Identifier membership |
//! | `near` | `40.0,-75.0` | Within 100 miles of latitude, longitude |
//! | `sort` | `price_asc` | One of the registered sort keys |
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": "<message>"}`:
//!
//! | HTTP Status | Cause |
//! |-------------|-------|
//! | 400 | Invalid query parameter or rental ID |
//! | 404 | No rental found |
//! | 500 | Query execution failed |
//! | 503 | Readiness ping failed |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their JSON rendering
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Axum middleware
//! - [`extractors`] - Axum extractors for filters and ids
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::{ServerConfig, StorageBackendMode};
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use rentals_persistence::core::RentalStorage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: RentalStorage + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use rentals_rest::{create_app_with_config, ServerConfig};
/// use rentals_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: RentalStorage + Send + Sync + 'static,
{
    create_app_from_arc(Arc::new(storage), config)
}

/// Creates the Axum application around a shared storage handle.
///
/// The caller keeps its own `Arc` and can close the store once the server
/// has shut down.
pub fn create_app_from_arc<S>(storage: Arc<S>, config: ServerConfig) -> Router
where
    S: RentalStorage + Send + Sync + 'static,
{
    info!(
        backend = storage.backend_name(),
        prefix = %config.api_prefix,
        "Creating rentals API"
    );

    let state = AppState::new(storage, config.clone());
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    let router = router.layer(service_builder);

    // Set must wrap Propagate so the generated id is visible on the way out.
    if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    }
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level` when set. Call once at startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "rentals_rest={level},rentals_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
