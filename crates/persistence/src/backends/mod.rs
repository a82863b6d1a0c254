//! Database backend implementations.
//!
//! | Backend | Feature | Pool | Radius search |
//! |---------|---------|------|---------------|
//! | PostgreSQL | `postgres` | deadpool-postgres | PostGIS `ST_DWithin` |
//! | SQLite | `sqlite` | r2d2 | registered haversine function |

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "sqlite")]
pub mod sqlite;
