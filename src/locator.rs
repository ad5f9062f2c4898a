//! Probe location lookup.
//!
//! A probe's coordinates are taken from the geolocation cache when any row
//! carries its id, otherwise from the Atlas probe endpoint. Coordinates are
//! treated as permanent, so cached ones are never re-checked. Nothing is written
//! here; the association is persisted when the place resolver stores a row.

use log::debug;

use crate::atlas::{AtlasClient, ProbeLocation};
use crate::storage::GeoCache;

/// Where a probe location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    /// Geolocation cache
    Cache,
    /// Atlas probe metadata
    Atlas,
}

/// Resolves probe ids to coordinates.
#[derive(Debug, Clone)]
pub struct ProbeLocator {
    cache: GeoCache,
    atlas: AtlasClient,
}

impl ProbeLocator {
    /// Creates a locator backed by `cache` and `atlas`.
    pub fn new(cache: GeoCache, atlas: AtlasClient) -> Self {
        Self { cache, atlas }
    }

    /// Returns the location of `probe_id` and where it was found.
    ///
    /// # Errors
    ///
    /// Cache I/O errors and Atlas request/decode errors, both unrecovered.
    pub async fn locate(&self, probe_id: i64) -> anyhow::Result<(ProbeLocation, LocationSource)> {
        if self.cache.lookup_probe(probe_id).await? {
            if let Some(location) = self.cache.lookup_geodata_by_probe(probe_id).await? {
                debug!("Probe {probe_id} location served from cache");
                return Ok((location, LocationSource::Cache));
            }
        }

        let location = self.atlas.fetch_probe(probe_id).await?;
        debug!(
            "Probe {probe_id} located at ({}, {}) [{}]",
            location.latitude, location.longitude, location.country_code
        );
        Ok((location, LocationSource::Atlas))
    }
}
