//! HTTP client for the RIPE Atlas REST API.

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::types::{MeasurementResult, ProbeDetails, ProbeLocation};
use crate::config::ATLAS_RESULTS_FORMAT;
use crate::error_handling::AtlasError;

/// Fetches measurement results and probe metadata.
#[derive(Debug, Clone)]
pub struct AtlasClient {
    client: Client,
    base_url: String,
}

impl AtlasClient {
    /// Creates a client rooted at `base_url` (e.g. `https://atlas.ripe.net/api/v2`).
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// URL of the results listing for a measurement, without the query string.
    pub fn results_url(&self, measurement_id: u64) -> String {
        format!("{}/measurements/{}/results", self.base_url, measurement_id)
    }

    /// URL of a probe's metadata.
    pub fn probe_url(&self, probe_id: i64) -> String {
        format!("{}/probes/{}/", self.base_url, probe_id)
    }

    /// Fetches all results of `measurement_id` between `start` and `stop`
    /// (Unix seconds, inclusive).
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status, or body that does not decode
    /// into a list of results.
    pub async fn fetch_results(
        &self,
        measurement_id: u64,
        start: i64,
        stop: i64,
    ) -> Result<Vec<MeasurementResult>, AtlasError> {
        let url = self.results_url(measurement_id);
        let query = [
            ("start", start.to_string()),
            ("stop", stop.to_string()),
            ("format", ATLAS_RESULTS_FORMAT.to_string()),
        ];
        self.get_json(&url, &query).await
    }

    /// Fetches a probe's coordinates and country code.
    ///
    /// # Errors
    ///
    /// Same conditions as [`AtlasClient::fetch_results`].
    pub async fn fetch_probe(&self, probe_id: i64) -> Result<ProbeLocation, AtlasError> {
        let url = self.probe_url(probe_id);
        let details: ProbeDetails = self.get_json(&url, &[]).await?;
        Ok(details.into())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AtlasError> {
        debug!("GET {url} {query:?}");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| AtlasError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AtlasError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| AtlasError::Request {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| AtlasError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
