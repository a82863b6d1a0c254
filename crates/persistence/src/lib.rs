//! Rentals Persistence Layer
//!
//! This crate turns raw rental search parameters into typed filters, compiles
//! them into parameterized SQL and runs the result against PostgreSQL or
//! SQLite.
//!
//! # Backend Features
//!
//! Available backend features:
//! - `postgres` (default) - PostgreSQL with PostGIS radius search
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Architecture
//!
//! - [`types`] - Rental listing, search filter and raw query parameters
//! - [`search`] - Validator, sort registry, query compiler and SQL dialects
//! - [`core`] - The [`RentalStorage`](core::RentalStorage) trait and row access
//! - [`backends`] - Backend implementations
//! - [`error`] - Error types for all operations
//!
//! # Quick Start
//!
//! ```
//! use rentals_persistence::search::{validate, Dialect, QueryCompiler, SortRegistry};
//! use rentals_persistence::types::QueryParams;
//!
//! let params = QueryParams::from_pairs([
//!     ("price_min", "50"),
//!     ("price_max", "200"),
//!     ("ids", "1,2,3"),
//!     ("sort", "price_asc"),
//! ]);
//!
//! let sorts = SortRegistry::default();
//! let filter = validate(&params, &sorts).unwrap();
//!
//! let query = QueryCompiler::new(Dialect::Postgres).compile_search(&filter);
//! assert_eq!(query.params.len(), 5);
//! assert!(!query.sql.contains("LIMIT"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod search;
pub mod types;

pub use error::{StorageError, StorageResult};

pub use core::{RentalStorage, RowAccess};
pub use search::{QueryCompiler, SortRegistry, validate};
pub use types::{QueryParams, Rental, SearchFilter};
