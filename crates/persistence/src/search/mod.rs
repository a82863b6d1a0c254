//! Rental search: validation, sorting and query compilation.
//!
//! - [`validator`] - Raw query parameters to a typed [`SearchFilter`](crate::types::SearchFilter)
//! - [`sort`] - Sort key allow-list shared by the validator and compiler
//! - [`compiler`] - Filter to parameterized SQL
//! - [`dialect`] - Placeholder and geo-predicate syntax per engine
//!
//! ```text
//! QueryParams ──validate──▶ SearchFilter ──compile_search──▶ CompiledQuery ──execute──▶ rows
//!                  ▲                              ▲
//!                  └────────── SortRegistry ──────┘
//! ```

pub mod compiler;
pub mod dialect;
pub mod sort;
pub mod validator;

pub use compiler::{
    ClauseBuilder, CompiledQuery, METERS_PER_MILE, QueryCompiler, SEARCH_RADIUS_MILES, SqlParam,
};
pub use dialect::{Dialect, SQLITE_WITHIN_RADIUS_FN};
pub use sort::{SortDirection, SortOrder, SortRegistry};
pub use validator::validate;
