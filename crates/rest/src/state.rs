//! Application state for the rentals REST API.
//!
//! Shared by every handler: the storage capability, the server configuration
//! and the sort allow-list the validator checks `sort` against.

use std::sync::Arc;

use rentals_persistence::core::RentalStorage;
use rentals_persistence::search::SortRegistry;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`RentalStorage`])
///
/// # Example
///
/// ```rust,ignore
/// use rentals_rest::{AppState, ServerConfig};
/// use rentals_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: RentalStorage> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a clone of the storage Arc.
    pub fn storage_arc(&self) -> Arc<S> {
        Arc::clone(&self.storage)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the sort allow-list.
    ///
    /// This is the registry the backend's compiler renders `ORDER BY` from, so
    /// a key accepted here always has a column to sort on.
    pub fn sort_registry(&self) -> &SortRegistry {
        self.storage.compiler().sort_registry()
    }
}
