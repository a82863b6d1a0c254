//! The rental listing returned by search and lookup.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::RowAccess;
use crate::error::{BackendError, StorageResult};

/// Daily price of a rental.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RentalPrice {
    /// Price per day, stored as `price_per_day`.
    pub day: i64,
}

/// Home location of a rental.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Stored as `home_city`.
    pub city: String,
    /// Stored as `home_state`.
    pub state: String,
    /// Stored as `home_zip`.
    pub zip: String,
    /// Stored as `home_country`.
    pub country: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// The user who owns a rental.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    /// Owner identifier, stored as `rentals.user_id`.
    pub id: i64,
    /// First name from the `users` table.
    pub first_name: String,
    /// Last name from the `users` table.
    pub last_name: String,
}

/// A rental vehicle listing.
///
/// Rentals are only ever built from a result row via [`Rental::from_row`];
/// there is no update path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    /// Rental identifier.
    pub id: i64,
    /// Listing title.
    pub name: String,
    /// Listing description.
    pub description: String,
    /// Vehicle type (e.g. `camper-van`, `trailer`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Stored as `vehicle_make`.
    pub make: String,
    /// Stored as `vehicle_model`.
    pub model: String,
    /// Stored as `vehicle_year`.
    pub year: i32,
    /// Stored as `vehicle_length`, in feet.
    pub length: f64,
    /// Number of people the vehicle sleeps.
    pub sleeps: i32,
    /// URL of the primary listing image.
    pub primary_image_url: String,
    /// Pricing.
    #[serde(rename = "rental_price")]
    pub price: RentalPrice,
    /// Home location.
    pub location: Location,
    /// Owning user.
    pub user: Owner,
    /// Creation time.
    #[serde(skip)]
    pub created: Option<NaiveDateTime>,
    /// Last update time.
    #[serde(skip)]
    pub updated: Option<NaiveDateTime>,
}

impl Rental {
    /// Maps a result row produced by the compiled rental projection.
    ///
    /// Columns are looked up by name. Nullable text columns default to an
    /// empty string and nullable numeric columns to zero; only `id` and
    /// `user_id` are required.
    pub fn from_row<R: RowAccess + ?Sized>(row: &R) -> StorageResult<Self> {
        Ok(Self {
            id: required_i64(row, "id")?,
            name: text(row, "name")?,
            description: text(row, "description")?,
            kind: text(row, "type")?,
            make: text(row, "vehicle_make")?,
            model: text(row, "vehicle_model")?,
            year: small_int(row, "vehicle_year")?,
            length: row.get_f64("vehicle_length")?.unwrap_or_default(),
            sleeps: small_int(row, "sleeps")?,
            primary_image_url: text(row, "primary_image_url")?,
            price: RentalPrice {
                day: row.get_i64("price_per_day")?.unwrap_or_default(),
            },
            location: Location {
                city: text(row, "home_city")?,
                state: text(row, "home_state")?,
                zip: text(row, "home_zip")?,
                country: text(row, "home_country")?,
                lat: row.get_f64("lat")?.unwrap_or_default(),
                lng: row.get_f64("lng")?.unwrap_or_default(),
            },
            user: Owner {
                id: required_i64(row, "user_id")?,
                first_name: text(row, "first_name")?,
                last_name: text(row, "last_name")?,
            },
            created: timestamp(row, "created")?,
            updated: timestamp(row, "updated")?,
        })
    }
}

fn text<R: RowAccess + ?Sized>(row: &R, column: &str) -> StorageResult<String> {
    Ok(row.get_text(column)?.unwrap_or_default())
}

fn required_i64<R: RowAccess + ?Sized>(row: &R, column: &str) -> StorageResult<i64> {
    row.get_i64(column)?.ok_or_else(|| {
        BackendError::RowMapping {
            column: column.to_string(),
            message: "unexpected NULL".to_string(),
        }
        .into()
    })
}

fn small_int<R: RowAccess + ?Sized>(row: &R, column: &str) -> StorageResult<i32> {
    let value = row.get_i64(column)?.unwrap_or_default();
    i32::try_from(value).map_err(|e| {
        BackendError::RowMapping {
            column: column.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Parses a timestamp rendered as text by either backend.
///
/// PostgreSQL renders `timestamp` as `2021-06-01 09:30:00.123` and
/// `timestamptz` with a trailing offset such as `+00`.
fn timestamp<R: RowAccess + ?Sized>(row: &R, column: &str) -> StorageResult<Option<NaiveDateTime>> {
    let Some(raw) = row.get_text(column)? else {
        return Ok(None);
    };
    let raw = raw.trim();

    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(Some(parsed));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(parsed));
    }
    DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z")
        .map(|dt| Some(dt.naive_utc()))
        .map_err(|e| {
            BackendError::RowMapping {
                column: column.to_string(),
                message: format!("invalid timestamp '{}': {}", raw, e),
            }
            .into()
        })
}
