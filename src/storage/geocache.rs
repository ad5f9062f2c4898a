//! Queries against the `geocache` table.
//!
//! The table serves two lookups: place by exact `(lat, lon)` and coordinates by
//! probe id. Expiry is lazy; nothing here sweeps rows on its own.

use std::path::Path;

use log::debug;
use sqlx::{Row, SqlitePool};

use crate::atlas::ProbeLocation;
use crate::config::UNRESOLVED_SENTINEL;
use crate::error_handling::DatabaseError;
use crate::geocode::Place;
use crate::storage::migrations::run_migrations;
use crate::storage::models::{CachedPlace, GeoCacheEntry};
use crate::storage::pool::init_db_pool_with_path;

/// Persistent geolocation cache backed by SQLite.
#[derive(Debug, Clone)]
pub struct GeoCache {
    pool: SqlitePool,
}

impl GeoCache {
    /// Opens the cache file, creating it and its schema when absent.
    pub async fn ensure_open(path: &Path) -> Result<Self, DatabaseError> {
        let pool = init_db_pool_with_path(path).await?;
        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, applying the schema if needed.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, DatabaseError> {
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the pool, flushing the connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Finds the cached place for an exact coordinate pair.
    ///
    /// Comparison is plain floating-point equality; coordinates must be the
    /// very values previously stored, not recomputed ones.
    pub async fn lookup_place(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<CachedPlace>, DatabaseError> {
        let row = sqlx::query(
            "SELECT expiry, country, state, city FROM geocache
             WHERE lat = ? AND lon = ?
             ORDER BY id
             LIMIT 1",
        )
        .bind(latitude)
        .bind(longitude)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let country: String = row.try_get("country")?;
        let state: String = row.try_get("state")?;
        let city: String = row.try_get("city")?;

        Ok(Some(CachedPlace {
            expiry: row.try_get("expiry")?,
            place: Place::from_columns(country, state, city),
        }))
    }

    /// Appends a row without checking for an existing one at the same key.
    pub async fn insert_place(&self, entry: &GeoCacheEntry) -> Result<(), DatabaseError> {
        let (country, state, city) = match &entry.place {
            Place::Resolved {
                country,
                state,
                city,
            } => (country.as_str(), state.as_str(), city.as_str()),
            Place::Unresolved => (
                UNRESOLVED_SENTINEL,
                UNRESOLVED_SENTINEL,
                UNRESOLVED_SENTINEL,
            ),
        };

        sqlx::query(
            "INSERT INTO geocache (
                probeid, country_code, expiry, lat, lon, country, state, city
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.probe_id)
        .bind(&entry.country_code)
        .bind(entry.expiry)
        .bind(entry.latitude)
        .bind(entry.longitude)
        .bind(country)
        .bind(state)
        .bind(city)
        .execute(&self.pool)
        .await?;

        debug!(
            "Cached place for ({}, {}) until {}",
            entry.latitude, entry.longitude, entry.expiry
        );
        Ok(())
    }

    /// Deletes every row whose expiry equals `expiry`, returning the count.
    ///
    /// Matches on the expiry value rather than the coordinates, so rows for
    /// other keys that happen to share the timestamp go too.
    pub async fn delete_by_expiry(&self, expiry: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM geocache WHERE expiry = ?")
            .bind(expiry)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Returns whether any row carries this probe id.
    pub async fn lookup_probe(&self, probe_id: i64) -> Result<bool, DatabaseError> {
        let row = sqlx::query("SELECT probeid FROM geocache WHERE probeid = ? LIMIT 1")
            .bind(probe_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Recovers the coordinates and country code stored alongside a probe id.
    pub async fn lookup_geodata_by_probe(
        &self,
        probe_id: i64,
    ) -> Result<Option<ProbeLocation>, DatabaseError> {
        let row = sqlx::query(
            "SELECT lat, lon, country_code FROM geocache
             WHERE probeid = ?
             ORDER BY id
             LIMIT 1",
        )
        .bind(probe_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| -> Result<ProbeLocation, DatabaseError> {
            Ok(ProbeLocation {
                latitude: row.try_get("lat")?,
                longitude: row.try_get("lon")?,
                country_code: row.try_get("country_code")?,
            })
        })
        .transpose()
    }
}
