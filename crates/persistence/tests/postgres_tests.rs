//! PostgreSQL backend tests.
//!
//! These tests cover configuration and SQL rendering only; constructing a
//! `PostgresBackend` connects immediately and needs a PostGIS-enabled server.
//!
//! Run with: `cargo test -p rentals-persistence --features postgres -- postgres`

#![cfg(feature = "postgres")]

use rentals_persistence::backends::postgres::{PostgresConfig, PostgresSslMode};
use rentals_persistence::search::{Dialect, QueryCompiler, SqlParam};
use rentals_persistence::types::{GeoPoint, SearchFilter};

#[test]
fn test_postgres_config_defaults() {
    let config = PostgresConfig::default();
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 5432);
    assert_eq!(config.dbname, "rentals");
    assert!(config.password.is_none());
    assert_eq!(config.max_connections, 10);
    assert_eq!(config.connect_timeout_secs, 5);
    assert_eq!(config.ssl_mode, PostgresSslMode::Disable);
}

#[test]
fn test_postgres_config_serialization() {
    let config = PostgresConfig {
        host: "pg-server".to_string(),
        port: 5433,
        dbname: "test_db".to_string(),
        user: "test_user".to_string(),
        password: Some("secret".to_string()),
        ..Default::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: PostgresConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.host, "pg-server");
    assert_eq!(deserialized.port, 5433);
    assert_eq!(deserialized.dbname, "test_db");
    assert_eq!(deserialized.user, "test_user");
    assert_eq!(deserialized.password, Some("secret".to_string()));
}

#[test]
fn test_postgres_config_partial_json_uses_defaults() {
    let config: PostgresConfig = serde_json::from_str(r#"{"host": "db"}"#).unwrap();
    assert_eq!(config.host, "db");
    assert_eq!(config.port, 5432);
    assert_eq!(config.statement_timeout_ms, 5000);
}

#[test]
fn test_postgres_search_sql() {
    let filter = SearchFilter::new()
        .with_price_max(250)
        .with_near(GeoPoint::new(33.64, -117.93))
        .with_sort("updated_desc")
        .with_limit(20)
        .with_offset(40);

    let query = QueryCompiler::new(Dialect::Postgres).compile_search(&filter);

    assert!(query.sql.starts_with("SELECT "));
    assert!(query.sql.contains("FROM rentals r JOIN users u ON u.id = r.user_id WHERE"));
    assert!(query.sql.contains("r.price_per_day <= $1::BIGINT AND ST_DWithin("));
    assert!(query.sql.contains("ST_MakePoint(-117.930000, 33.640000)::geography"));
    assert!(query.sql.ends_with(
        "ORDER BY r.updated DESC, r.id ASC LIMIT $2::BIGINT OFFSET $3::BIGINT"
    ));
    assert_eq!(
        query.params,
        vec![
            SqlParam::Integer(250),
            SqlParam::Integer(20),
            SqlParam::Integer(40)
        ]
    );
}
