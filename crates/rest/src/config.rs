//! Server configuration for the rentals REST API.
//!
//! Supports both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RENTALS_SERVER_PORT` | 8080 | Server port |
//! | `RENTALS_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `RENTALS_LOG_LEVEL` | info | Log level |
//! | `RENTALS_REQUEST_TIMEOUT` | 5 | Request timeout (seconds) |
//! | `RENTALS_ENABLE_CORS` | true | Enable CORS |
//! | `RENTALS_CORS_ORIGINS` | * | Allowed origins |
//! | `RENTALS_CORS_METHODS` | GET,OPTIONS | Allowed methods |
//! | `RENTALS_CORS_HEADERS` | Content-Type,Accept,Authorization | Allowed headers |
//! | `RENTALS_API_PREFIX` | /api | Prefix of the rentals routes |
//! | `RENTALS_STORAGE_BACKEND` | postgres | `postgres` or `sqlite` |
//! | `RENTALS_DATABASE_URL` | | PostgreSQL URL or SQLite path |
//! | `RENTALS_ENABLE_REQUEST_ID` | true | Tag requests with `x-request-id` |
//!
//! # Example
//!
//! ```rust
//! use rentals_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! ```

use std::fmt;

use clap::{Parser, ValueEnum};

/// Which storage backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendMode {
    /// PostgreSQL with PostGIS.
    Postgres,
    /// SQLite file or in-memory database.
    Sqlite,
}

impl fmt::Display for StorageBackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackendMode::Postgres => write!(f, "postgres"),
            StorageBackendMode::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Server configuration for the rentals REST API.
///
/// Can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "rentals")]
#[command(about = "Rental listings search API")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "RENTALS_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "RENTALS_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "RENTALS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "RENTALS_REQUEST_TIMEOUT", default_value = "5")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "RENTALS_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "RENTALS_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "RENTALS_CORS_METHODS", default_value = "GET,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "RENTALS_CORS_HEADERS",
        default_value = "Content-Type,Accept,Authorization"
    )]
    pub cors_headers: String,

    /// Path prefix of the rentals routes.
    #[arg(long, env = "RENTALS_API_PREFIX", default_value = "/api")]
    pub api_prefix: String,

    /// Storage backend.
    #[arg(long, env = "RENTALS_STORAGE_BACKEND", value_enum, default_value_t = StorageBackendMode::Postgres)]
    pub storage_backend: StorageBackendMode,

    /// Database connection string (PostgreSQL URL or SQLite path).
    #[arg(long, env = "RENTALS_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Enable request ID tracking.
    #[arg(long, env = "RENTALS_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 5,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept,Authorization".to_string(),
            api_prefix: "/api".to_string(),
            storage_backend: StorageBackendMode::Postgres,
            database_url: None,
            enable_request_id: true,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// Parses environment variables without requiring command line arguments.
    pub fn from_env() -> Self {
        Self::try_parse_from(["rentals"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the rentals collection path, e.g. `/api/rentals`.
    pub fn rentals_path(&self) -> String {
        format!("{}/rentals", self.api_prefix.trim_end_matches('/'))
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            errors.push(format!(
                "API prefix must start with '/', got '{}'",
                self.api_prefix
            ));
        }

        if self.storage_backend == StorageBackendMode::Sqlite && self.database_url.is_none() {
            errors.push("SQLite backend requires a database URL (file path or :memory:)".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0 and an in-memory SQLite database, and disables
    /// features that might interfere with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            enable_cors: false,
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            storage_backend: StorageBackendMode::Sqlite,
            database_url: Some(":memory:".to_string()),
            enable_request_id: false,
            ..Default::default()
        }
    }
}
