//! RentalStorage implementation for SQLite.

use async_trait::async_trait;

use crate::core::RentalStorage;
use crate::error::{BackendError, StorageResult};
use crate::search::{CompiledQuery, QueryCompiler, SqlParam};
use crate::types::Rental;

use super::SqliteBackend;

fn query_error(e: rusqlite::Error) -> BackendError {
    tracing::warn!(error = %e, "SQLite query failed");
    BackendError::query_failed("sqlite", e)
}

#[async_trait]
impl RentalStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn compiler(&self) -> &QueryCompiler {
        self.query_compiler()
    }

    async fn execute(&self, query: &CompiledQuery) -> StorageResult<Vec<Rental>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&query.sql).map_err(query_error)?;

        let params: Vec<Box<dyn rusqlite::ToSql>> = query
            .params
            .iter()
            .map(|param| match param {
                SqlParam::Integer(i) => Box::new(*i) as Box<dyn rusqlite::ToSql>,
            })
            .collect();
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut rows = stmt.query(param_refs.as_slice()).map_err(query_error)?;
        let mut rentals = Vec::new();
        while let Some(row) = rows.next().map_err(query_error)? {
            rentals.push(Rental::from_row(row)?);
        }

        Ok(rentals)
    }

    async fn ping(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|e| BackendError::connection_failed("sqlite", e))?;
        Ok(())
    }
}
