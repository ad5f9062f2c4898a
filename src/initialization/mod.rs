//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - HTTP client
//!
//! The SQLite cache is opened by [`crate::storage::GeoCache::ensure_open`].

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
