//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, USER_AGENT};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client shared by the Atlas and geocoding clients.
///
/// Creates a `reqwest::Client` configured with:
/// - the crate's User-Agent
/// - the configured per-request timeout
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    build_client(config.timeout_seconds, USER_AGENT)
}

fn build_client(
    timeout_seconds: u64,
    user_agent: &str,
) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_with_defaults() {
        assert!(init_client(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_user_agent_is_an_initialization_error() {
        // Header values cannot contain newlines
        let err = build_client(10, "atlas_gelf\nbroken").unwrap_err();
        assert!(matches!(err, InitializationError::HttpClientError(_)));
        assert!(err
            .to_string()
            .starts_with("HTTP client initialization error"));
    }
}
