//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including default endpoints, cache lifetimes, and GELF framing limits.

/// Default SQLite file backing the geolocation cache
pub const DEFAULT_CACHE_PATH: &str = "./geocache.db";

/// Default GELF receiver host
pub const DEFAULT_GELF_HOST: &str = "localhost";
/// Default GELF receiver UDP port
pub const DEFAULT_GELF_PORT: u16 = 5555;

/// RIPE Atlas REST API root (measurements and probes live below it)
pub const DEFAULT_ATLAS_API_URL: &str = "https://atlas.ripe.net/api/v2";
/// OpenCage reverse geocoding endpoint
pub const DEFAULT_GEOCODE_API_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Per-request HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Lifetime of a cached place in seconds.
///
/// Applied to resolved and unresolved places alike, so a failing coordinate
/// pair is geocoded at most once per hour.
pub const PLACE_CACHE_TTL_SECS: i64 = 3600;

/// Stored in place of country, state and city when geocoding failed
pub const UNRESOLVED_SENTINEL: &str = "N/A";

/// Output format requested from the measurement results endpoint
pub const ATLAS_RESULTS_FORMAT: &str = "json";

/// `host` field stamped on every emitted record
pub const GELF_SOURCE_HOST: &str = "ripe-atlas";
/// GELF protocol version
pub const GELF_VERSION: &str = "1.1";
/// Syslog severity "informational"
pub const GELF_LEVEL_INFO: u8 = 6;

/// Largest UDP datagram the GELF client sends.
///
/// Matches the default MTU used by common GELF UDP clients (1450) minus
/// headroom for IP/UDP headers on tunnelled links.
pub const GELF_MAX_DATAGRAM_SIZE: usize = 1420;
/// Size of the header prefixed to each GELF chunk
pub const GELF_CHUNK_HEADER_SIZE: usize = 12;
/// GELF chunk magic bytes
pub const GELF_CHUNK_MAGIC: [u8; 2] = [0x1e, 0x0f];
/// Receivers discard messages split into more chunks than this
pub const GELF_MAX_CHUNKS: usize = 128;

/// User-Agent sent to the Atlas and OpenCage APIs
pub const USER_AGENT: &str = concat!("atlas_gelf/", env!("CARGO_PKG_VERSION"));
