// storage/mod.rs
// Persistent geolocation cache

mod geocache;
mod migrations;
mod models;
mod pool;
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use geocache::GeoCache;
pub use migrations::run_migrations;
pub use models::{CachedPlace, GeoCacheEntry};
pub use pool::init_db_pool_with_path;
