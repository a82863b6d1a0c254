//! Rental query compiler.
//!
//! Turns a [`SearchFilter`] into SQL text plus an ordered argument list.
//! Optional clauses are accumulated in a [`ClauseBuilder`], which hands out
//! parameter slots at the moment a value is bound so that slot `N` in the
//! text always binds to argument `N` regardless of which clauses are present.

use std::sync::Arc;

use crate::types::SearchFilter;

use super::dialect::Dialect;
use super::sort::SortRegistry;

/// Radius of the `near` search, in miles.
pub const SEARCH_RADIUS_MILES: f64 = 100.0;

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Columns selected for every rental query, aliased to the names
/// [`Rental::from_row`](crate::types::Rental::from_row) reads.
///
/// The casts normalise storage types so both backends hand back the same
/// value kinds.
const RENTAL_PROJECTION: &str = "SELECT \
    CAST(r.id AS BIGINT) AS id, \
    CAST(r.user_id AS BIGINT) AS user_id, \
    r.name AS name, \
    r.description AS description, \
    r.type AS type, \
    r.vehicle_make AS vehicle_make, \
    r.vehicle_model AS vehicle_model, \
    CAST(r.vehicle_year AS BIGINT) AS vehicle_year, \
    CAST(r.vehicle_length AS DOUBLE PRECISION) AS vehicle_length, \
    CAST(r.sleeps AS BIGINT) AS sleeps, \
    r.primary_image_url AS primary_image_url, \
    CAST(r.price_per_day AS BIGINT) AS price_per_day, \
    r.home_city AS home_city, \
    r.home_state AS home_state, \
    r.home_zip AS home_zip, \
    r.home_country AS home_country, \
    CAST(r.lat AS DOUBLE PRECISION) AS lat, \
    CAST(r.lng AS DOUBLE PRECISION) AS lng, \
    CAST(r.created AS TEXT) AS created, \
    CAST(r.updated AS TEXT) AS updated, \
    u.first_name AS first_name, \
    u.last_name AS last_name \
    FROM rentals r JOIN users u ON u.id = r.user_id";

/// Ordering appended after every sort so pages are stable.
const TIE_BREAKER: &str = "r.id ASC";

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    /// Integer parameter.
    Integer(i64),
}

impl SqlParam {
    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }

    /// Creates an integer parameter from an unsigned value, saturating at `i64::MAX`.
    pub fn unsigned(u: u64) -> Self {
        SqlParam::Integer(i64::try_from(u).unwrap_or(i64::MAX))
    }
}

/// SQL text with its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    /// The SQL text.
    pub sql: String,
    /// Bound parameter values; element `N - 1` binds to slot `N`.
    pub params: Vec<SqlParam>,
}

impl CompiledQuery {
    /// Number of parameter slots used.
    pub fn slot_count(&self) -> usize {
        self.params.len()
    }
}

/// Accumulates predicates and bound values for one query.
#[derive(Debug)]
pub struct ClauseBuilder {
    dialect: Dialect,
    predicates: Vec<String>,
    params: Vec<SqlParam>,
}

impl ClauseBuilder {
    /// Creates an empty builder.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            predicates: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Binds a value to the next slot and returns its placeholder.
    pub fn bind(&mut self, param: SqlParam) -> String {
        let slot = self.params.len() + 1;
        let placeholder = self.dialect.placeholder(slot, &param);
        self.params.push(param);
        placeholder
    }

    /// Adds a predicate to be ANDed with the others.
    pub fn push_predicate(&mut self, predicate: impl Into<String>) {
        self.predicates.push(predicate.into());
    }

    /// Renders ` WHERE a AND b`, or nothing when no predicate was added.
    pub fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.predicates.join(" AND "))
        }
    }

    /// Dialect placeholders are rendered in.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Consumes the builder, returning the bound values in slot order.
    pub fn into_params(self) -> Vec<SqlParam> {
        self.params
    }
}

/// Compiles rental searches and lookups for one dialect.
///
/// The compiler is pure: it never touches a connection and compiling the
/// same filter twice yields identical output.
///
/// # Examples
///
/// ```
/// use rentals_persistence::search::{Dialect, QueryCompiler, SqlParam};
/// use rentals_persistence::types::SearchFilter;
///
/// let compiler = QueryCompiler::new(Dialect::Postgres);
/// let filter = SearchFilter::new()
///     .with_price_min(50)
///     .with_ids(vec![1, 2])
///     .with_sort("price_asc");
///
/// let query = compiler.compile_search(&filter);
/// assert!(query.sql.contains("WHERE r.price_per_day >= $1::BIGINT AND r.id IN ($2::BIGINT, $3::BIGINT)"));
/// assert!(query.sql.ends_with("ORDER BY r.price_per_day ASC, r.id ASC"));
/// assert_eq!(query.params, vec![SqlParam::Integer(50), SqlParam::Integer(1), SqlParam::Integer(2)]);
/// ```
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    dialect: Dialect,
    sorts: Arc<SortRegistry>,
}

impl QueryCompiler {
    /// Creates a compiler using the standard sort keys.
    pub fn new(dialect: Dialect) -> Self {
        Self::with_sort_registry(dialect, Arc::new(SortRegistry::default()))
    }

    /// Creates a compiler using a custom sort registry.
    pub fn with_sort_registry(dialect: Dialect, sorts: Arc<SortRegistry>) -> Self {
        Self { dialect, sorts }
    }

    /// Dialect queries are rendered in.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Sort allow-list used for `ORDER BY`.
    pub fn sort_registry(&self) -> &Arc<SortRegistry> {
        &self.sorts
    }

    /// Compiles a search.
    ///
    /// Predicates are added in the fixed order price-min, price-max, ids,
    /// near; then `ORDER BY`, `LIMIT` and `OFFSET`. A zero limit or offset
    /// omits the clause. An offset without a limit gets the dialect's
    /// unbounded `LIMIT` when the engine requires one.
    pub fn compile_search(&self, filter: &SearchFilter) -> CompiledQuery {
        let mut builder = ClauseBuilder::new(self.dialect);

        if let Some(min) = filter.price_min() {
            let slot = builder.bind(SqlParam::unsigned(min));
            builder.push_predicate(format!("r.price_per_day >= {}", slot));
        }

        if let Some(max) = filter.price_max() {
            let slot = builder.bind(SqlParam::unsigned(max));
            builder.push_predicate(format!("r.price_per_day <= {}", slot));
        }

        if !filter.ids().is_empty() {
            let slots: Vec<String> = filter
                .ids()
                .iter()
                .map(|id| builder.bind(SqlParam::integer(*id)))
                .collect();
            builder.push_predicate(format!("r.id IN ({})", slots.join(", ")));
        }

        if let Some(point) = filter.near() {
            let meters = SEARCH_RADIUS_MILES * METERS_PER_MILE;
            builder.push_predicate(self.dialect.within_radius(&point, meters));
        }

        let order = self.sorts.resolve(filter.sort());
        let mut sql = format!(
            "{}{} ORDER BY {}, {}",
            RENTAL_PROJECTION,
            builder.where_clause(),
            order,
            TIE_BREAKER
        );

        let limit = filter.limit().filter(|l| *l > 0);
        if let Some(limit) = limit {
            let slot = builder.bind(SqlParam::unsigned(limit));
            sql.push_str(&format!(" LIMIT {}", slot));
        }

        if let Some(offset) = filter.offset().filter(|o| *o > 0) {
            if limit.is_none() {
                if let Some(unbounded) = builder.dialect().unbounded_limit() {
                    sql.push(' ');
                    sql.push_str(unbounded);
                }
            }
            let slot = builder.bind(SqlParam::unsigned(offset));
            sql.push_str(&format!(" OFFSET {}", slot));
        }

        CompiledQuery {
            sql,
            params: builder.into_params(),
        }
    }

    /// Compiles a lookup of one rental by identifier.
    pub fn compile_lookup(&self, id: i64) -> CompiledQuery {
        let mut builder = ClauseBuilder::new(self.dialect);
        let slot = builder.bind(SqlParam::integer(id));
        builder.push_predicate(format!("r.id = {}", slot));

        CompiledQuery {
            sql: format!("{}{} LIMIT 1", RENTAL_PROJECTION, builder.where_clause()),
            params: builder.into_params(),
        }
    }
}
