//! Fetch, enrich and emit the results of one measurement.
//!
//! Results are handled strictly one after another: locate the probe, resolve
//! its place, emit the record, then move on. Only geocoding failures are
//! absorbed; any other error ends the run.

mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};

use crate::atlas::{AtlasClient, MeasurementResult};
use crate::config::Config;
use crate::gelf::{AtlasRecord, GelfClient};
use crate::geocode::{GeocodeClient, PlaceResolver, PlaceSource};
use crate::initialization::init_client;
use crate::locator::{LocationSource, ProbeLocator};
use crate::storage::GeoCache;

pub use report::RunReport;

/// The one-shot Atlas to Graylog job.
#[derive(Debug)]
pub struct MeasurementPipeline {
    atlas: AtlasClient,
    locator: ProbeLocator,
    resolver: PlaceResolver,
    gelf: GelfClient,
    cache: GeoCache,
}

impl MeasurementPipeline {
    /// Opens the cache, builds the HTTP clients and binds the GELF socket.
    ///
    /// # Errors
    ///
    /// Fails if the cache cannot be opened or migrated, the HTTP client cannot
    /// be built, or the GELF host does not resolve.
    pub async fn new(config: &Config) -> Result<Self> {
        let http = init_client(config).context("Failed to initialize HTTP client")?;
        let cache = GeoCache::ensure_open(&config.cache_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to open geolocation cache at {}",
                    config.cache_path.display()
                )
            })?;
        let gelf = GelfClient::connect(
            &config.transport_host,
            config.transport_port,
            config.gelf_compress,
        )
        .await
        .with_context(|| {
            format!(
                "Failed to set up GELF transport to {}:{}",
                config.transport_host, config.transport_port
            )
        })?;

        let atlas = AtlasClient::new(http.clone(), config.atlas_api_url.as_str());
        let geocoder = GeocodeClient::new(
            http,
            config.geocode_api_url.as_str(),
            config.geocode_api_key.as_str(),
        );

        Ok(Self {
            locator: ProbeLocator::new(cache.clone(), atlas.clone()),
            resolver: PlaceResolver::new(cache.clone(), geocoder),
            atlas,
            gelf,
            cache,
        })
    }

    /// Processes the last `minutes` of `measurement_id`, ending now.
    pub async fn run(&self, measurement_id: u64, minutes: u64) -> Result<RunReport> {
        self.run_at(measurement_id, minutes, Utc::now().timestamp())
            .await
    }

    /// Processes the window `[now - minutes * 60, now]`.
    ///
    /// `now` also serves as the reference time for cache expiry.
    pub async fn run_at(&self, measurement_id: u64, minutes: u64, now: i64) -> Result<RunReport> {
        let start_time = std::time::Instant::now();
        let window_secs = i64::try_from(minutes.saturating_mul(60)).unwrap_or(i64::MAX);
        let window_start = now.saturating_sub(window_secs);

        info!(
            measurement_id = measurement_id, stage = "fetch";
            "Fetching results of measurement {measurement_id} from {}",
            self.atlas.results_url(measurement_id)
        );
        let results = self
            .atlas
            .fetch_results(measurement_id, window_start, now)
            .await
            .with_context(|| {
                format!("Failed to fetch results of measurement {measurement_id}")
            })?;
        info!(
            measurement_id = measurement_id, stage = "fetch";
            "Measurement {measurement_id}: {} result(s) between {window_start} and {now}",
            results.len()
        );

        let mut report = RunReport::new(measurement_id, window_start, now);
        for result in &results {
            self.process_result(result, now, &mut report).await?;
        }

        report.elapsed_seconds = start_time.elapsed().as_secs_f64();
        Ok(report)
    }

    async fn process_result(
        &self,
        result: &MeasurementResult,
        now: i64,
        report: &mut RunReport,
    ) -> Result<()> {
        let probe_id = result.prb_id;
        let measurement_id = report.measurement_id;
        debug!(
            measurement_id = measurement_id, stage = "locate", probe_id = probe_id;
            "Processing result of probe {probe_id} at {}",
            result.timestamp
        );

        let (location, location_source) = self
            .locator
            .locate(probe_id)
            .await
            .with_context(|| format!("Failed to locate probe {probe_id}"))?;
        match location_source {
            LocationSource::Cache => report.probes_from_cache += 1,
            LocationSource::Atlas => report.probes_from_atlas += 1,
        }

        let resolution = self
            .resolver
            .resolve(
                probe_id,
                &location.country_code,
                location.latitude,
                location.longitude,
                now,
            )
            .await
            .with_context(|| format!("Failed to resolve place of probe {probe_id}"))?;
        match resolution.source {
            PlaceSource::Cache => report.places_from_cache += 1,
            PlaceSource::StaleCache => report.places_stale += 1,
            PlaceSource::Geocoder => report.places_geocoded += 1,
        }
        if !resolution.place.is_resolved() {
            report.places_unresolved += 1;
        }

        let record = AtlasRecord::new(result, &location.country_code, &resolution.place);
        let fields = record
            .to_fields()
            .context("Failed to serialize GELF record")?;
        self.gelf
            .log(fields)
            .await
            .with_context(|| format!("Failed to emit GELF record for probe {probe_id}"))?;
        report.records_emitted += 1;

        debug!(
            measurement_id = measurement_id, stage = "emit", probe_id = probe_id;
            "Emitted probe {probe_id} [{}] {}",
            record.country_code, record.location_extended
        );
        Ok(())
    }

    /// Closes the cache connection.
    pub async fn close(self) {
        self.cache.close().await;
    }
}
