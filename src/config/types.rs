//! Configuration types.
//!
//! This module defines the enums and the `Config` struct passed into the
//! pipeline. Everything except the two positional CLI arguments is read from
//! the environment (optionally seeded from a `.env` file).

use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_ATLAS_API_URL, DEFAULT_CACHE_PATH, DEFAULT_GELF_HOST, DEFAULT_GELF_PORT,
    DEFAULT_GEOCODE_API_URL, DEFAULT_TIMEOUT_SECS,
};
use crate::error_handling::ConfigError;

/// Environment variable names recognised by [`Config::from_env`].
pub mod env_vars {
    /// GELF receiver host
    pub const GELF_HOST: &str = "ATLAS_GELF_HOST";
    /// GELF receiver UDP port
    pub const GELF_PORT: &str = "ATLAS_GELF_PORT";
    /// Whether GELF payloads are zlib-compressed
    pub const GELF_COMPRESS: &str = "ATLAS_GELF_COMPRESS";
    /// OpenCage API key
    pub const GEOCODE_API_KEY: &str = "OPENCAGE_API_KEY";
    /// OpenCage endpoint override
    pub const GEOCODE_API_URL: &str = "OPENCAGE_API_URL";
    /// RIPE Atlas API root override
    pub const ATLAS_API_URL: &str = "ATLAS_API_URL";
    /// Path of the SQLite geolocation cache
    pub const CACHE_PATH: &str = "ATLAS_GELF_CACHE_PATH";
    /// HTTP timeout in seconds
    pub const TIMEOUT_SECS: &str = "ATLAS_GELF_TIMEOUT_SECS";
    /// Log level
    pub const LOG_LEVEL: &str = "ATLAS_GELF_LOG_LEVEL";
    /// Log format
    pub const LOG_FORMAT: &str = "ATLAS_GELF_LOG_FORMAT";
}

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Runtime configuration for a pipeline run.
///
/// Constructed once, either programmatically or through [`Config::from_env`],
/// and handed to [`crate::MeasurementPipeline::new`].
///
/// # Examples
///
/// ```no_run
/// use atlas_gelf::Config;
///
/// let config = Config {
///     transport_host: "graylog.internal".to_string(),
///     geocode_api_key: "secret".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// GELF receiver host
    pub transport_host: String,

    /// GELF receiver UDP port
    pub transport_port: u16,

    /// Compress GELF payloads with zlib before sending
    pub gelf_compress: bool,

    /// OpenCage API key
    pub geocode_api_key: String,

    /// OpenCage reverse geocoding endpoint
    pub geocode_api_url: String,

    /// RIPE Atlas API root
    pub atlas_api_url: String,

    /// SQLite file backing the geolocation cache
    pub cache_path: PathBuf,

    /// Per-request HTTP timeout in seconds
    pub timeout_seconds: u64,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport_host: DEFAULT_GELF_HOST.to_string(),
            transport_port: DEFAULT_GELF_PORT,
            gelf_compress: true,
            geocode_api_key: String::new(),
            geocode_api_url: DEFAULT_GEOCODE_API_URL.to_string(),
            atlas_api_url: DEFAULT_ATLAS_API_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Builds a configuration from the process environment.
    ///
    /// Unset variables fall back to the defaults; set but unparsable values are
    /// rejected so a typo never silently sends logs to the wrong place.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup(env_vars::GELF_HOST) {
            config.transport_host = host;
        }
        if let Some(port) = lookup(env_vars::GELF_PORT) {
            config.transport_port = parse_value(env_vars::GELF_PORT, &port)?;
        }
        if let Some(compress) = lookup(env_vars::GELF_COMPRESS) {
            config.gelf_compress = parse_bool(env_vars::GELF_COMPRESS, &compress)?;
        }
        if let Some(key) = lookup(env_vars::GEOCODE_API_KEY) {
            config.geocode_api_key = key;
        }
        if let Some(api_url) = lookup(env_vars::GEOCODE_API_URL) {
            config.geocode_api_url = parse_url(env_vars::GEOCODE_API_URL, api_url)?;
        }
        if let Some(api_url) = lookup(env_vars::ATLAS_API_URL) {
            config.atlas_api_url = parse_url(env_vars::ATLAS_API_URL, api_url)?;
        }
        if let Some(path) = lookup(env_vars::CACHE_PATH) {
            config.cache_path = PathBuf::from(path);
        }
        if let Some(timeout) = lookup(env_vars::TIMEOUT_SECS) {
            config.timeout_seconds = parse_value(env_vars::TIMEOUT_SECS, &timeout)?;
        }
        if let Some(level) = lookup(env_vars::LOG_LEVEL) {
            config.log_level = parse_enum(env_vars::LOG_LEVEL, &level)?;
        }
        if let Some(format) = lookup(env_vars::LOG_FORMAT) {
            config.log_format = parse_enum(env_vars::LOG_FORMAT, &format)?;
        }

        Ok(config)
    }
}

fn invalid(key: &str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| invalid(key, value, e))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}

fn parse_enum<T: ValueEnum>(key: &str, value: &str) -> Result<T, ConfigError> {
    T::from_str(value.trim(), true).map_err(|e| invalid(key, value, e))
}

fn parse_url(key: &str, value: String) -> Result<String, ConfigError> {
    url::Url::parse(&value).map_err(|e| invalid(key, &value, e))?;
    // Joined with "/measurements/..." later, so a trailing slash would double up.
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_from_lookup_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).expect("defaults should be valid");
        assert_eq!(config.transport_host, "localhost");
        assert_eq!(config.transport_port, 5555);
        assert!(config.gelf_compress);
        assert_eq!(config.cache_path, PathBuf::from("./geocache.db"));
        assert_eq!(config.atlas_api_url, "https://atlas.ripe.net/api/v2");
        assert!(config.geocode_api_key.is_empty());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("ATLAS_GELF_HOST", "graylog.example.net"),
            ("ATLAS_GELF_PORT", "12201"),
            ("ATLAS_GELF_COMPRESS", "off"),
            ("OPENCAGE_API_KEY", "abc123"),
            ("ATLAS_GELF_CACHE_PATH", "/var/lib/atlas/geo.db"),
            ("ATLAS_API_URL", "http://127.0.0.1:8080/api/v2/"),
            ("ATLAS_GELF_LOG_LEVEL", "DEBUG"),
            ("ATLAS_GELF_LOG_FORMAT", "json"),
        ]))
        .expect("overrides should parse");

        assert_eq!(config.transport_host, "graylog.example.net");
        assert_eq!(config.transport_port, 12201);
        assert!(!config.gelf_compress);
        assert_eq!(config.geocode_api_key, "abc123");
        assert_eq!(config.cache_path, PathBuf::from("/var/lib/atlas/geo.db"));
        assert_eq!(config.atlas_api_url, "http://127.0.0.1:8080/api/v2");
        assert!(matches!(config.log_level, LogLevel::Debug));
        assert!(matches!(config.log_format, LogFormat::Json));
    }

    #[test]
    fn test_from_lookup_rejects_bad_port() {
        let err = Config::from_lookup(lookup_from(&[("ATLAS_GELF_PORT", "graylog")]))
            .expect_err("non-numeric port must fail");
        let msg = err.to_string();
        assert!(msg.contains("ATLAS_GELF_PORT"), "unexpected message: {msg}");
        assert!(msg.contains("graylog"));
    }

    #[test]
    fn test_from_lookup_rejects_out_of_range_port() {
        assert!(Config::from_lookup(lookup_from(&[("ATLAS_GELF_PORT", "70000")])).is_err());
    }

    #[test]
    fn test_from_lookup_rejects_bad_url() {
        assert!(Config::from_lookup(lookup_from(&[("ATLAS_API_URL", "not a url")])).is_err());
    }

    #[test]
    fn test_from_lookup_rejects_unknown_log_format() {
        assert!(Config::from_lookup(lookup_from(&[("ATLAS_GELF_LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn test_parse_bool_variants() {
        for truthy in ["1", "true", "YES", " on "] {
            assert!(parse_bool("K", truthy).unwrap(), "{truthy} should be true");
        }
        for falsy in ["0", "False", "no", "OFF"] {
            assert!(!parse_bool("K", falsy).unwrap(), "{falsy} should be false");
        }
        assert!(parse_bool("K", "maybe").is_err());
    }
}
