//! Core storage traits and abstractions.
//!
//! - [`RentalStorage`] - Search and lookup over a compiled-query executor
//! - [`RowAccess`] - Column access over backend result rows
//!
//! ```text
//! RentalStorage
//!     ├── compiler()  ──▶ QueryCompiler (dialect-specific, pure)
//!     ├── execute()   ──▶ rows ──▶ Rental::from_row(&dyn RowAccess)
//!     ├── search()    ──▶ NoMatches on zero rows
//!     └── read()      ──▶ NotFound on zero rows
//! ```

mod row;
mod storage;

pub use row::RowAccess;
pub use storage::RentalStorage;
