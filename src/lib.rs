//! atlas_gelf library: RIPE Atlas results, geolocated, shipped to Graylog.
//!
//! For one measurement and a time window ending now, the pipeline fetches the
//! results, locates each result's probe, reverse geocodes the probe's
//! coordinates through a SQLite-backed cache, and sends the enriched record
//! as a GELF message over UDP.
//!
//! # Example
//!
//! ```no_run
//! use atlas_gelf::{Config, MeasurementPipeline};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pipeline = MeasurementPipeline::new(&config).await?;
//! let report = pipeline.run(12345, 5).await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod atlas;
pub mod cli;
pub mod config;
pub mod error_handling;
pub mod gelf;
pub mod geocode;
pub mod initialization;
pub mod locator;
mod pipeline;
pub mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use geocode::Place;
pub use pipeline::{MeasurementPipeline, RunReport};
pub use storage::{run_migrations, GeoCache};
