//! SQLite schema bootstrap.

use rusqlite::Connection;

use crate::error::{BackendError, StorageResult};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS rentals (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id),
    name TEXT,
    type TEXT,
    description TEXT,
    sleeps INTEGER,
    price_per_day INTEGER,
    home_city TEXT,
    home_state TEXT,
    home_zip TEXT,
    home_country TEXT,
    vehicle_make TEXT,
    vehicle_model TEXT,
    vehicle_year INTEGER,
    vehicle_length REAL,
    created TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    lat REAL,
    lng REAL,
    primary_image_url TEXT
);

CREATE INDEX IF NOT EXISTS idx_rentals_price ON rentals(price_per_day);
CREATE INDEX IF NOT EXISTS idx_rentals_created ON rentals(created);
";

/// Creates the `users` and `rentals` tables when missing.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(SCHEMA).map_err(|e| {
        BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: format!("Failed to create schema: {}", e),
            source: Some(Box::new(e)),
        }
        .into()
    })
}
