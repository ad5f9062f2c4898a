//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, cache TTL, GELF framing limits)
//! - The `Config` struct and its environment loader
//! - Logging option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{env_vars, Config, LogFormat, LogLevel};
