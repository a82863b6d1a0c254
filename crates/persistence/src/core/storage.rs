//! Rental storage trait.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ResourceError, StorageResult};
use crate::search::{CompiledQuery, QueryCompiler};
use crate::types::{Rental, SearchFilter};

/// Storage for rental listings.
///
/// Backends supply a compiler for their dialect and an executor for compiled
/// queries. `search` and `read` are provided on top of those two and map an
/// empty result to a [`ResourceError`], distinct from an execution failure.
///
/// # Example
///
/// ```ignore
/// use rentals_persistence::core::RentalStorage;
/// use rentals_persistence::types::SearchFilter;
///
/// async fn cheapest<S: RentalStorage>(storage: &S) -> StorageResult<Vec<Rental>> {
///     let filter = SearchFilter::new().with_sort("price_asc").with_limit(5);
///     storage.search(&filter).await
/// }
/// ```
#[async_trait]
pub trait RentalStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Returns the compiler rendering queries for this backend's dialect.
    fn compiler(&self) -> &QueryCompiler;

    /// Runs a compiled query and maps every row to a rental.
    ///
    /// Zero rows is an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// * `StorageError::Backend` - If the connection, query or row mapping fails
    async fn execute(&self, query: &CompiledQuery) -> StorageResult<Vec<Rental>>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> StorageResult<()>;

    /// Releases pooled connections. Called once at shutdown.
    fn close(&self) {}

    /// Returns every rental matching the filter.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NoMatches)` - If no rental matched
    /// * `StorageError::Backend` - If execution failed
    async fn search(&self, filter: &SearchFilter) -> StorageResult<Vec<Rental>> {
        let query = self.compiler().compile_search(filter);
        debug!(
            backend = self.backend_name(),
            sql = %query.sql,
            params = query.params.len(),
            "Executing rental search"
        );

        let rentals = self.execute(&query).await?;
        if rentals.is_empty() {
            return Err(ResourceError::NoMatches.into());
        }
        Ok(rentals)
    }

    /// Returns the rental with the given identifier.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If no rental has this identifier
    /// * `StorageError::Backend` - If execution failed
    async fn read(&self, id: i64) -> StorageResult<Rental> {
        let query = self.compiler().compile_lookup(id);
        debug!(backend = self.backend_name(), id, "Executing rental lookup");

        self.execute(&query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ResourceError::NotFound { id }.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::{BackendError, StorageError};
    use crate::search::Dialect;

    /// Storage returning canned rows and recording the SQL it was given.
    struct CannedStorage {
        compiler: QueryCompiler,
        rows: Vec<Rental>,
        fail: bool,
        seen: Mutex<Vec<CompiledQuery>>,
    }

    impl CannedStorage {
        fn new(rows: Vec<Rental>) -> Self {
            Self {
                compiler: QueryCompiler::new(Dialect::Sqlite),
                rows,
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RentalStorage for CannedStorage {
        fn backend_name(&self) -> &'static str {
            "canned"
        }

        fn compiler(&self) -> &QueryCompiler {
            &self.compiler
        }

        async fn execute(&self, query: &CompiledQuery) -> StorageResult<Vec<Rental>> {
            self.seen.lock().unwrap().push(query.clone());
            if self.fail {
                return Err(BackendError::query_failed("canned", "boom").into());
            }
            Ok(self.rows.clone())
        }

        async fn ping(&self) -> StorageResult<()> {
            Ok(())
        }
    }

    fn rental(id: i64) -> Rental {
        Rental {
            id,
            ..Default::default()
        }
    }

    #[test]
    fn test_search_empty_is_no_matches() {
        let storage = CannedStorage::new(Vec::new());
        let err = tokio_test::block_on(storage.search(&SearchFilter::new())).unwrap_err();
        assert!(matches!(err, StorageError::Resource(ResourceError::NoMatches)));
    }

    #[test]
    fn test_search_compiles_with_backend_compiler() {
        let storage = CannedStorage::new(vec![rental(1), rental(2)]);
        let filter = SearchFilter::new().with_price_max(100);

        let rentals = tokio_test::block_on(storage.search(&filter)).unwrap();
        assert_eq!(rentals.len(), 2);

        let seen = storage.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].sql.contains("r.price_per_day <= ?1"));
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let storage = CannedStorage::new(Vec::new());
        let err = tokio_test::block_on(storage.read(12)).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Resource(ResourceError::NotFound { id: 12 })
        ));
    }

    #[test]
    fn test_read_returns_first_row() {
        let storage = CannedStorage::new(vec![rental(5)]);
        let found = tokio_test::block_on(storage.read(5)).unwrap();
        assert_eq!(found.id, 5);
    }

    #[test]
    fn test_execution_failure_is_not_not_found() {
        let mut storage = CannedStorage::new(Vec::new());
        storage.fail = true;

        let err = tokio_test::block_on(storage.read(1)).unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(err, StorageError::Backend(_)));
    }
}
