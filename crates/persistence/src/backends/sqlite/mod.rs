//! SQLite backend implementation.
//!
//! Supports in-memory databases (for tests) and file-based databases (for
//! development). Each pooled connection gets the `rentals_within_radius`
//! function so `near` searches work without a spatial extension.
//!
//! # Example
//!
//! ```no_run
//! use rentals_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//! backend.execute_batch(
//!     "INSERT INTO users (id, first_name, last_name) VALUES (1, 'Ada', 'Lovelace');",
//! )?;
//! # Ok(())
//! # }
//! ```

mod backend;
pub mod functions;
pub(crate) mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
