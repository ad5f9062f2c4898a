//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error raised when an environment value cannot be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The variable is set but its value does not parse.
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Environment variable name
        key: String,
        /// Offending value
        value: String,
        /// Parser message
        reason: String,
    },
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Errors talking to the RIPE Atlas API.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("Request to {url} failed: {source}")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying transport error
        #[source]
        source: ReqwestError,
    },

    /// The API answered with a non-success status.
    #[error("Request to {url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The body was not the JSON shape we expect.
    #[error("Malformed response from {url}: {source}")]
    Decode {
        /// Requested URL
        url: String,
        /// Decoder error
        #[source]
        source: serde_json::Error,
    },
}

/// Reasons a reverse geocoding lookup produced no place.
///
/// Never escapes the place resolver; every variant degrades to an unresolved
/// place.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Transport failure, including timeouts.
    #[error("Geocoding request failed: {0}")]
    Request(#[from] ReqwestError),

    /// Non-success HTTP status.
    #[error("Geocoding service returned HTTP {0}")]
    Status(u16),

    /// Body was not valid JSON.
    #[error("Malformed geocoding response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response carried no results at all.
    #[error("Geocoding response contained no results")]
    NoResults,

    /// The first result lacked one of the required components.
    #[error("Geocoding result is missing the {0} component")]
    MissingComponent(&'static str),
}

/// Errors emitting a GELF message.
#[derive(Error, Debug)]
pub enum GelfError {
    /// The message could not be serialized to JSON.
    #[error("Failed to serialize GELF message: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Socket or compression I/O failed.
    #[error("GELF transport error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload does not fit in the maximum number of chunks.
    #[error("GELF message of {size} bytes needs {chunks} chunks (max {max})")]
    TooManyChunks {
        /// Payload size after compression
        size: usize,
        /// Chunks required
        chunks: usize,
        /// Protocol limit
        max: usize,
    },
}
