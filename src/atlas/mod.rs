//! RIPE Atlas API access.
//!
//! Two endpoints are used: the results of one measurement over a time window,
//! and the metadata (location) of a single probe.

mod client;
mod types;

pub use client::AtlasClient;
pub use types::{MeasurementResult, ProbeLocation};
