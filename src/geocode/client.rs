//! OpenCage reverse geocoding client.

use log::debug;
use reqwest::Client;

use super::types::{GeocodeResponse, Place};
use crate::error_handling::GeocodeError;

/// Reverse geocodes coordinates through the OpenCage API.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl GeocodeClient {
    /// Creates a client for `api_url` authenticated with `api_key`.
    pub fn new(client: Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Looks up country, state and city for a coordinate pair.
    ///
    /// The first result must carry all three components; anything less is an
    /// error.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Place, GeocodeError> {
        let q = format!("{latitude} {longitude}");
        debug!("Reverse geocoding {q}");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", q.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: GeocodeResponse = serde_json::from_str(&body)?;
        let first = parsed
            .results
            .into_iter()
            .next()
            .ok_or(GeocodeError::NoResults)?;

        let components = first.components;
        Ok(Place::Resolved {
            country: components
                .country
                .ok_or(GeocodeError::MissingComponent("country"))?,
            state: components
                .state
                .ok_or(GeocodeError::MissingComponent("state"))?,
            city: components
                .city
                .ok_or(GeocodeError::MissingComponent("city"))?,
        })
    }
}
