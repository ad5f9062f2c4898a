//! Error handling.
//!
//! Errors are split by how the pipeline treats them:
//! - **Fatal**: `AtlasError` while fetching results, `ConfigError`, `InitializationError`
//! - **Degraded**: `GeocodeError`, turned into an unresolved place
//! - **Propagated**: `DatabaseError`, `GelfError`, and `AtlasError` from probe lookups

mod types;

// Re-export public API
pub use types::{
    AtlasError, ConfigError, DatabaseError, GelfError, GeocodeError, InitializationError,
};
