//! Rows of the `geocache` table.

use crate::geocode::Place;

/// A row to append to the geolocation cache.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoCacheEntry {
    /// Probe the place was first resolved for (informational)
    pub probe_id: i64,
    /// Country code reported by the probe metadata
    pub country_code: String,
    /// Unix timestamp after which the row is stale
    pub expiry: i64,
    /// Latitude, half of the lookup key
    pub latitude: f64,
    /// Longitude, half of the lookup key
    pub longitude: f64,
    /// Resolved place, stored as three `"N/A"` columns when unresolved
    pub place: Place,
}

/// Result of a place lookup by coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPlace {
    /// Stored expiry timestamp, needed to evict the row
    pub expiry: i64,
    /// Stored place
    pub place: Place,
}

impl CachedPlace {
    /// A row is fresh strictly before its expiry.
    pub fn is_fresh(&self, now: i64) -> bool {
        now < self.expiry
    }
}
