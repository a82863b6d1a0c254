//! PostgreSQL backend implementation.
//!
//! Connection pooling via deadpool-postgres, queries via tokio-postgres.
//! Radius searches rely on PostGIS (`ST_DWithin` over `geography`).
//!
//! # Example
//!
//! ```no_run
//! use rentals_persistence::backends::postgres::{PostgresBackend, PostgresConfig};
//! use rentals_persistence::core::RentalStorage;
//!
//! # async fn main_example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = PostgresBackend::new(PostgresConfig::from_env()).await?;
//! let rental = backend.read(1).await?;
//! println!("{}", rental.name);
//! # Ok(())
//! # }
//! ```
//!
//! # Expected schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id SERIAL PRIMARY KEY,
//!     first_name TEXT NOT NULL,
//!     last_name TEXT NOT NULL
//! );
//!
//! CREATE TABLE rentals (
//!     id SERIAL PRIMARY KEY,
//!     user_id INTEGER NOT NULL REFERENCES users(id),
//!     name TEXT, type TEXT, description TEXT, sleeps INTEGER,
//!     price_per_day BIGINT,
//!     home_city TEXT, home_state TEXT, home_zip TEXT, home_country TEXT,
//!     vehicle_make TEXT, vehicle_model TEXT, vehicle_year INTEGER,
//!     vehicle_length NUMERIC(4,2),
//!     created TIMESTAMP NOT NULL DEFAULT now(),
//!     updated TIMESTAMP NOT NULL DEFAULT now(),
//!     lat DOUBLE PRECISION, lng DOUBLE PRECISION,
//!     primary_image_url TEXT
//! );
//! ```

mod backend;
mod storage;

pub use backend::{PostgresBackend, PostgresConfig, PostgresSslMode};
