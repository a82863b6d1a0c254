//! Column access over backend result rows.

use crate::error::{BackendError, StorageResult};

/// Read access to a result row by column name.
///
/// A missing column or a type mismatch is an error; SQL `NULL` is `Ok(None)`.
pub trait RowAccess {
    /// Reads an integer column.
    fn get_i64(&self, column: &str) -> StorageResult<Option<i64>>;
    /// Reads a floating-point column.
    fn get_f64(&self, column: &str) -> StorageResult<Option<f64>>;
    /// Reads a text column.
    fn get_text(&self, column: &str) -> StorageResult<Option<String>>;
}

fn mapping_error(column: &str, err: impl std::fmt::Display) -> BackendError {
    BackendError::RowMapping {
        column: column.to_string(),
        message: err.to_string(),
    }
}

#[cfg(feature = "postgres")]
impl RowAccess for tokio_postgres::Row {
    fn get_i64(&self, column: &str) -> StorageResult<Option<i64>> {
        self.try_get(column)
            .map_err(|e| mapping_error(column, e).into())
    }

    fn get_f64(&self, column: &str) -> StorageResult<Option<f64>> {
        self.try_get(column)
            .map_err(|e| mapping_error(column, e).into())
    }

    fn get_text(&self, column: &str) -> StorageResult<Option<String>> {
        self.try_get(column)
            .map_err(|e| mapping_error(column, e).into())
    }
}

#[cfg(feature = "sqlite")]
impl RowAccess for rusqlite::Row<'_> {
    fn get_i64(&self, column: &str) -> StorageResult<Option<i64>> {
        self.get(column)
            .map_err(|e| mapping_error(column, e).into())
    }

    fn get_f64(&self, column: &str) -> StorageResult<Option<f64>> {
        self.get(column)
            .map_err(|e| mapping_error(column, e).into())
    }

    fn get_text(&self, column: &str) -> StorageResult<Option<String>> {
        self.get(column)
            .map_err(|e| mapping_error(column, e).into())
    }
}
