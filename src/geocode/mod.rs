//! Reverse geocoding of probe coordinates.
//!
//! [`GeocodeClient`] talks to OpenCage; [`PlaceResolver`] puts the SQLite
//! geolocation cache in front of it.

mod client;
mod resolver;
mod types;

pub use client::GeocodeClient;
pub use resolver::{PlaceResolver, PlaceSource, Resolution};
pub use types::Place;
