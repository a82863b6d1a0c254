//! RentalStorage implementation for PostgreSQL.

use async_trait::async_trait;
use tokio_postgres::types::ToSql;
use tracing::warn;

use crate::core::RentalStorage;
use crate::error::{BackendError, StorageResult};
use crate::search::{CompiledQuery, QueryCompiler, SqlParam};
use crate::types::Rental;

use super::PostgresBackend;

fn to_sql_params(params: &[SqlParam]) -> Vec<Box<dyn ToSql + Sync + Send>> {
    params
        .iter()
        .map(|param| match param {
            SqlParam::Integer(i) => Box::new(*i) as Box<dyn ToSql + Sync + Send>,
        })
        .collect()
}

#[async_trait]
impl RentalStorage for PostgresBackend {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    fn compiler(&self) -> &QueryCompiler {
        self.query_compiler()
    }

    async fn execute(&self, query: &CompiledQuery) -> StorageResult<Vec<Rental>> {
        let client = self.get_client().await?;

        let params = to_sql_params(&query.params);
        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let rows = client.query(&query.sql, &param_refs).await.map_err(|e| {
            warn!(error = %e, sql = %query.sql, "PostgreSQL query failed");
            BackendError::query_failed("postgres", e)
        })?;

        rows.iter().map(|row| Rental::from_row(row)).collect()
    }

    async fn ping(&self) -> StorageResult<()> {
        self.verify_connection().await
    }

    fn close(&self) {
        self.close_pool();
    }
}
