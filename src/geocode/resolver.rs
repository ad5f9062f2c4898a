//! Cached place resolution.
//!
//! Per coordinate pair the cache is either empty, fresh, or stale:
//! - empty: geocode, store the outcome (even a failure) for one TTL
//! - fresh: serve the stored place
//! - stale: serve the stored place one last time and evict it, so the next
//!   lookup of the key geocodes again

use log::{debug, warn};

use super::client::GeocodeClient;
use super::types::Place;
use crate::config::PLACE_CACHE_TTL_SECS;
use crate::error_handling::DatabaseError;
use crate::storage::{GeoCache, GeoCacheEntry};

/// Where a resolved place came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceSource {
    /// Fresh cache row
    Cache,
    /// Expired cache row, evicted after this read
    StaleCache,
    /// Geocoder call (successful or not)
    Geocoder,
}

/// A place together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The place
    pub place: Place,
    /// Its origin
    pub source: PlaceSource,
}

/// Resolves coordinates to places through the geolocation cache.
#[derive(Debug, Clone)]
pub struct PlaceResolver {
    cache: GeoCache,
    geocoder: GeocodeClient,
}

impl PlaceResolver {
    /// Creates a resolver over `cache` falling back to `geocoder`.
    pub fn new(cache: GeoCache, geocoder: GeocodeClient) -> Self {
        Self { cache, geocoder }
    }

    /// Resolves `(latitude, longitude)` as of `now` (Unix seconds).
    ///
    /// Geocoding failures never surface here; they resolve to
    /// [`Place::Unresolved`] and are cached like any other answer.
    ///
    /// # Errors
    ///
    /// Only cache I/O errors.
    pub async fn resolve(
        &self,
        probe_id: i64,
        country_code: &str,
        latitude: f64,
        longitude: f64,
        now: i64,
    ) -> Result<Resolution, DatabaseError> {
        if let Some(cached) = self.cache.lookup_place(latitude, longitude).await? {
            if cached.is_fresh(now) {
                debug!("Place cache hit for ({latitude}, {longitude})");
                return Ok(Resolution {
                    place: cached.place,
                    source: PlaceSource::Cache,
                });
            }

            let evicted = self.cache.delete_by_expiry(cached.expiry).await?;
            debug!(
                "Place cache entry for ({latitude}, {longitude}) expired at {}, evicted {evicted} row(s)",
                cached.expiry
            );
            return Ok(Resolution {
                place: cached.place,
                source: PlaceSource::StaleCache,
            });
        }

        debug!("Place cache miss for ({latitude}, {longitude})");
        let place = match self.geocoder.reverse(latitude, longitude).await {
            Ok(place) => place,
            Err(e) => {
                warn!(
                    stage = "resolve", probe_id = probe_id;
                    "Reverse geocoding ({latitude}, {longitude}) for probe {probe_id} failed: {e}"
                );
                Place::Unresolved
            }
        };

        self.cache
            .insert_place(&GeoCacheEntry {
                probe_id,
                country_code: country_code.to_string(),
                expiry: now + PLACE_CACHE_TTL_SECS,
                latitude,
                longitude,
                place: place.clone(),
            })
            .await?;

        Ok(Resolution {
            place,
            source: PlaceSource::Geocoder,
        })
    }
}
