//! SQLite backend integration tests.
//!
//! Each test runs against a fresh in-memory database seeded with the same
//! five rentals.
//!
//! Run with: `cargo test -p rentals-persistence --features sqlite -- sqlite`

#![cfg(feature = "sqlite")]

use std::sync::Arc;

use rentals_persistence::backends::sqlite::SqliteBackend;
use rentals_persistence::core::RentalStorage;
use rentals_persistence::error::{ResourceError, StorageError};
use rentals_persistence::search::{SortRegistry, validate};
use rentals_persistence::types::{GeoPoint, QueryParams, SearchFilter};

const FIXTURES: &str = "
INSERT INTO users (id, first_name, last_name) VALUES
    (1, 'Ada', 'Lovelace'),
    (2, 'Grace', 'Hopper');

INSERT INTO rentals (id, user_id, name, type, description, sleeps, price_per_day,
    home_city, home_state, home_zip, home_country, vehicle_make, vehicle_model,
    vehicle_year, vehicle_length, created, updated, lat, lng, primary_image_url)
VALUES
    (1, 1, 'Philly Van', 'camper-van', 'Compact', 2, 100, 'Philadelphia', 'PA', '19103', 'US',
     'Volkswagen', 'Westfalia', 2015, 15.5, '2021-01-01 00:00:00', '2021-01-02 00:00:00', 40.0, -75.0,
     'https://example.com/1.jpg'),
    (2, 1, 'Brooklyn Trailer', 'trailer', 'Roomy', 4, 150, 'Brooklyn', 'NY', '11201', 'US',
     'Airstream', 'Bambi', 2018, 20.0, '2021-02-01 00:00:00', '2021-02-02 00:00:00', 40.7, -74.0,
     'https://example.com/2.jpg'),
    (3, 1, 'LA Cruiser', 'class-c', 'Sunny', 6, 180, 'Los Angeles', 'CA', '90012', 'US',
     'Ford', 'Majestic', 2020, 28.0, '2021-03-01 00:00:00', '2021-03-02 00:00:00', 34.05, -118.24,
     'https://example.com/3.jpg'),
    (4, 2, 'Bend Lodge', 'class-a', 'Big', 8, 300, 'Bend', 'OR', '97701', 'US',
     'Winnebago', 'Adventurer', 2010, 35.0, '2021-04-01 00:00:00', '2021-04-02 00:00:00', 44.05, -121.31,
     'https://example.com/4.jpg'),
    (5, 2, 'Center City Camper', 'camper-van', 'Cozy', 2, 150, 'Philadelphia', 'PA', '19107', 'US',
     'Mercedes-Benz', 'Sprinter', 2019, 19.0, '2021-05-01 00:00:00', '2021-05-02 00:00:00', 39.95, -75.16,
     'https://example.com/5.jpg');
";

fn seeded_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().unwrap();
    backend.init_schema().unwrap();
    backend.execute_batch(FIXTURES).unwrap();
    backend
}

fn ids(rentals: &[rentals_persistence::Rental]) -> Vec<i64> {
    rentals.iter().map(|r| r.id).collect()
}

#[tokio::test]
async fn sqlite_price_range_ids_sorted_by_price() {
    let backend = seeded_backend();
    let filter = SearchFilter::new()
        .with_price_min(50)
        .with_price_max(200)
        .with_ids(vec![1, 2, 3])
        .with_sort("price_asc");

    let rentals = backend.search(&filter).await.unwrap();
    assert_eq!(ids(&rentals), vec![1, 2, 3]);
    assert_eq!(rentals[0].price.day, 100);
    assert_eq!(rentals[1].price.day, 150);
    assert_eq!(rentals[2].price.day, 180);
}

#[tokio::test]
async fn sqlite_default_order_is_newest_first() {
    let backend = seeded_backend();
    let rentals = backend.search(&SearchFilter::new()).await.unwrap();
    assert_eq!(ids(&rentals), vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn sqlite_ties_break_on_id() {
    let backend = seeded_backend();
    let filter = SearchFilter::new().with_sort("price_asc");

    let rentals = backend.search(&filter).await.unwrap();
    assert_eq!(ids(&rentals), vec![1, 2, 5, 3, 4]);

    let filter = SearchFilter::new().with_sort("price_desc");
    let rentals = backend.search(&filter).await.unwrap();
    assert_eq!(ids(&rentals), vec![4, 3, 2, 5, 1]);
}

#[tokio::test]
async fn sqlite_near_filters_by_radius() {
    let backend = seeded_backend();
    let filter = SearchFilter::new().with_near(GeoPoint::new(40.0, -75.0));

    let rentals = backend.search(&filter).await.unwrap();
    assert_eq!(ids(&rentals), vec![5, 2, 1]);
}

#[tokio::test]
async fn sqlite_near_combined_with_price() {
    let backend = seeded_backend();
    let filter = SearchFilter::new()
        .with_price_min(120)
        .with_near(GeoPoint::new(40.0, -75.0))
        .with_sort("year_asc");

    let rentals = backend.search(&filter).await.unwrap();
    assert_eq!(ids(&rentals), vec![2, 5]);
}

#[tokio::test]
async fn sqlite_limit_and_offset() {
    let backend = seeded_backend();
    let filter = SearchFilter::new().with_limit(2).with_offset(1);

    let rentals = backend.search(&filter).await.unwrap();
    assert_eq!(ids(&rentals), vec![4, 3]);

    let filter = SearchFilter::new().with_offset(3);
    let rentals = backend.search(&filter).await.unwrap();
    assert_eq!(ids(&rentals), vec![2, 1]);
}

#[tokio::test]
async fn sqlite_zero_limit_means_unbounded() {
    let backend = seeded_backend();
    let filter = SearchFilter::new().with_limit(0).with_offset(0);

    let rentals = backend.search(&filter).await.unwrap();
    assert_eq!(rentals.len(), 5);
}

#[tokio::test]
async fn sqlite_zero_limit_with_offset_skips_rows() {
    let backend = seeded_backend();
    let filter = SearchFilter::new().with_limit(0).with_offset(2);

    let rentals = backend.search(&filter).await.unwrap();
    assert_eq!(ids(&rentals), vec![3, 2, 1]);
}

#[tokio::test]
async fn sqlite_inverted_range_is_no_matches() {
    let backend = seeded_backend();
    let filter = SearchFilter::new().with_price_min(500).with_price_max(100);

    let err = backend.search(&filter).await.unwrap_err();
    assert!(matches!(err, StorageError::Resource(ResourceError::NoMatches)));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn sqlite_offset_past_end_is_no_matches() {
    let backend = seeded_backend();
    let filter = SearchFilter::new().with_offset(50);

    let err = backend.search(&filter).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn sqlite_read_maps_every_field() {
    let backend = seeded_backend();
    let rental = backend.read(2).await.unwrap();

    assert_eq!(rental.id, 2);
    assert_eq!(rental.name, "Brooklyn Trailer");
    assert_eq!(rental.kind, "trailer");
    assert_eq!(rental.make, "Airstream");
    assert_eq!(rental.model, "Bambi");
    assert_eq!(rental.year, 2018);
    assert_eq!(rental.length, 20.0);
    assert_eq!(rental.sleeps, 4);
    assert_eq!(rental.price.day, 150);
    assert_eq!(rental.location.city, "Brooklyn");
    assert_eq!(rental.location.zip, "11201");
    assert_eq!(rental.location.lat, 40.7);
    assert_eq!(rental.user.id, 1);
    assert_eq!(rental.user.first_name, "Ada");
    assert_eq!(rental.user.last_name, "Lovelace");
    assert!(rental.created.is_some());
    assert!(rental.updated.is_some());
}

#[tokio::test]
async fn sqlite_read_missing_is_not_found() {
    let backend = seeded_backend();
    let err = backend.read(999).await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::Resource(ResourceError::NotFound { id: 999 })
    ));
}

#[tokio::test]
async fn sqlite_validated_params_end_to_end() {
    let backend = seeded_backend();
    let sorts = SortRegistry::default();
    let params = QueryParams::from_pairs([
        ("price_max", "160"),
        ("sort", "created_asc"),
        ("limit", "2"),
    ]);

    let filter = validate(&params, &sorts).unwrap();
    let rentals = backend.search(&filter).await.unwrap();
    assert_eq!(ids(&rentals), vec![1, 2]);
}

#[tokio::test]
async fn sqlite_custom_sort_registry() {
    let sorts = Arc::new(SortRegistry::default().with("sleeps", "r.sleeps"));
    let backend = seeded_backend().with_sort_registry(sorts);

    let filter = SearchFilter::new().with_sort("sleeps_desc");
    let rentals = backend.search(&filter).await.unwrap();
    assert_eq!(ids(&rentals), vec![4, 3, 2, 1, 5]);
}

#[tokio::test]
async fn sqlite_ping() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend.ping().await.unwrap();
    assert_eq!(backend.backend_name(), "sqlite");
}

#[tokio::test]
async fn sqlite_empty_database_is_no_matches() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend.init_schema().unwrap();

    let err = backend.search(&SearchFilter::new()).await.unwrap_err();
    assert!(err.is_not_found());
}
