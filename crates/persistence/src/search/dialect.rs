//! SQL dialects understood by the compiler.

use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

use super::compiler::SqlParam;

/// Name of the scalar function the SQLite backend registers for radius checks.
pub const SQLITE_WITHIN_RADIUS_FN: &str = "rentals_within_radius";

/// Placeholder and geo-predicate syntax for one SQL engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL with PostGIS: `$N` placeholders, `ST_DWithin`.
    Postgres,
    /// SQLite: `?N` placeholders, a registered haversine function.
    Sqlite,
}

impl Dialect {
    /// Renders the placeholder for a 1-based slot.
    pub fn placeholder(&self, slot: usize, param: &SqlParam) -> String {
        match self {
            Dialect::Postgres => match param {
                SqlParam::Integer(_) => format!("${}::BIGINT", slot),
            },
            Dialect::Sqlite => format!("?{}", slot),
        }
    }

    /// Renders a predicate true when the rental lies within `meters` of `point`.
    ///
    /// Coordinates and the radius are inlined as fixed-precision literals and
    /// consume no parameter slots.
    pub fn within_radius(&self, point: &GeoPoint, meters: f64) -> String {
        match self {
            Dialect::Postgres => format!(
                "ST_DWithin(ST_MakePoint({:.6}, {:.6})::geography, \
                 ST_MakePoint(r.lng, r.lat)::geography, {:.6})",
                point.lng, point.lat, meters
            ),
            Dialect::Sqlite => format!(
                "{}(r.lat, r.lng, {:.6}, {:.6}, {:.6}) = 1",
                SQLITE_WITHIN_RADIUS_FN, point.lat, point.lng, meters
            ),
        }
    }

    /// `LIMIT` clause to emit ahead of an `OFFSET` when no limit was given.
    ///
    /// SQLite only accepts `OFFSET` after `LIMIT`; a negative limit means
    /// no upper bound there.
    pub fn unbounded_limit(&self) -> Option<&'static str> {
        match self {
            Dialect::Postgres => None,
            Dialect::Sqlite => Some("LIMIT -1"),
        }
    }

    /// Lowercase engine name.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        let p = SqlParam::Integer(5);
        assert_eq!(Dialect::Postgres.placeholder(3, &p), "$3::BIGINT");
        assert_eq!(Dialect::Sqlite.placeholder(3, &p), "?3");
    }

    #[test]
    fn test_unbounded_limit() {
        assert_eq!(Dialect::Postgres.unbounded_limit(), None);
        assert_eq!(Dialect::Sqlite.unbounded_limit(), Some("LIMIT -1"));
    }

    #[test]
    fn test_postgres_radius_orders_lng_first() {
        let sql = Dialect::Postgres.within_radius(&GeoPoint::new(40.0, -75.0), 1000.0);
        assert_eq!(
            sql,
            "ST_DWithin(ST_MakePoint(-75.000000, 40.000000)::geography, \
             ST_MakePoint(r.lng, r.lat)::geography, 1000.000000)"
        );
    }

    #[test]
    fn test_sqlite_radius_uses_registered_function() {
        let sql = Dialect::Sqlite.within_radius(&GeoPoint::new(40.0, -75.0), 1000.0);
        assert_eq!(
            sql,
            "rentals_within_radius(r.lat, r.lng, 40.000000, -75.000000, 1000.000000) = 1"
        );
    }
}
