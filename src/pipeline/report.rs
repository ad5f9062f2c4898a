//! Run summary.

/// Counters describing one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Measurement processed
    pub measurement_id: u64,
    /// Window start, Unix seconds
    pub window_start: i64,
    /// Window end, Unix seconds
    pub window_stop: i64,
    /// GELF messages sent
    pub records_emitted: usize,
    /// Probe locations recovered from the cache
    pub probes_from_cache: usize,
    /// Probe locations fetched from Atlas
    pub probes_from_atlas: usize,
    /// Places served from a fresh cache row
    pub places_from_cache: usize,
    /// Places served from an expired row that was then evicted
    pub places_stale: usize,
    /// Places obtained by calling the geocoder
    pub places_geocoded: usize,
    /// Places that ended up `N/A`, wherever they came from
    pub places_unresolved: usize,
    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
}

impl RunReport {
    /// Empty report for a window.
    pub fn new(measurement_id: u64, window_start: i64, window_stop: i64) -> Self {
        Self {
            measurement_id,
            window_start,
            window_stop,
            ..Default::default()
        }
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        format!(
            "Sent {} record{} for measurement {} ({} place{} from cache, {} geocoded, {} unresolved) in {:.1}s",
            self.records_emitted,
            if self.records_emitted == 1 { "" } else { "s" },
            self.measurement_id,
            self.places_from_cache + self.places_stale,
            if self.places_from_cache + self.places_stale == 1 { "" } else { "s" },
            self.places_geocoded,
            self.places_unresolved,
            self.elapsed_seconds
        )
    }
}
