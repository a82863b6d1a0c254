//! Scalar SQL functions registered on every SQLite connection.

use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;

use crate::search::SQLITE_WITHIN_RADIUS_FN;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle distance in meters between two points given in degrees.
pub fn haversine_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Registers `rentals_within_radius(lat, lng, center_lat, center_lng, meters)`.
///
/// Returns 1 when the point lies within `meters` of the center, 0 otherwise
/// or when any argument is NULL.
pub fn register(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        SQLITE_WITHIN_RADIUS_FN,
        5,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let mut args = [0.0f64; 5];
            for (i, slot) in args.iter_mut().enumerate() {
                match ctx.get::<Option<f64>>(i)? {
                    Some(value) => *slot = value,
                    None => return Ok(0i64),
                }
            }
            let [lat, lng, center_lat, center_lng, meters] = args;
            Ok(i64::from(haversine_meters(center_lat, center_lng, lat, lng) <= meters))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // Philadelphia to New York is roughly 130 km.
        let d = haversine_meters(39.9526, -75.1652, 40.7128, -74.0060);
        assert!((125_000.0..135_000.0).contains(&d), "{d}");
        assert_eq!(haversine_meters(10.0, 10.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn test_registered_function() {
        let conn = Connection::open_in_memory().unwrap();
        register(&conn).unwrap();

        let near: i64 = conn
            .query_row(
                "SELECT rentals_within_radius(40.71, -74.00, 39.95, -75.16, 160934.0)",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(near, 1);

        let far: i64 = conn
            .query_row(
                "SELECT rentals_within_radius(34.05, -118.24, 39.95, -75.16, 160934.0)",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(far, 0);

        let null: i64 = conn
            .query_row(
                "SELECT rentals_within_radius(NULL, -74.00, 39.95, -75.16, 160934.0)",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(null, 0);
    }
}
