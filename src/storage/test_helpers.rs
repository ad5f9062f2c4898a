//! Shared test helpers for storage and resolver tests.

#[cfg(test)]
use sqlx::sqlite::SqlitePoolOptions;

#[cfg(test)]
use crate::geocode::Place;
#[cfg(test)]
use crate::storage::{GeoCache, GeoCacheEntry};

/// Creates a cache on an in-memory database with migrations applied.
#[cfg(test)]
pub async fn create_test_cache() -> GeoCache {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    GeoCache::from_pool(pool)
        .await
        .expect("Failed to run migrations")
}

/// Builds a resolved Amsterdam entry at the given key.
#[cfg(test)]
pub fn sample_entry(probe_id: i64, latitude: f64, longitude: f64, expiry: i64) -> GeoCacheEntry {
    GeoCacheEntry {
        probe_id,
        country_code: "NL".to_string(),
        expiry,
        latitude,
        longitude,
        place: Place::Resolved {
            country: "Netherlands".to_string(),
            state: "North Holland".to_string(),
            city: "Amsterdam".to_string(),
        },
    }
}
