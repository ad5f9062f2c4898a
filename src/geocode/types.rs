//! Place data structures.

use serde::Deserialize;

use crate::config::UNRESOLVED_SENTINEL;

/// Outcome of reverse geocoding a coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Place {
    /// The geocoder returned all three components.
    Resolved {
        /// Country name
        country: String,
        /// State or region
        state: String,
        /// City
        city: String,
    },
    /// Geocoding was attempted and failed.
    Unresolved,
}

impl Place {
    /// Rebuilds a place from stored columns; the all-sentinel triple maps back
    /// to `Unresolved`.
    pub fn from_columns(country: String, state: String, city: String) -> Self {
        if country == UNRESOLVED_SENTINEL && state == UNRESOLVED_SENTINEL && city == UNRESOLVED_SENTINEL
        {
            Place::Unresolved
        } else {
            Place::Resolved {
                country,
                state,
                city,
            }
        }
    }

    /// Whether the geocoder produced this place.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Place::Resolved { .. })
    }

    /// Country, or `"N/A"`.
    pub fn country(&self) -> &str {
        match self {
            Place::Resolved { country, .. } => country,
            Place::Unresolved => UNRESOLVED_SENTINEL,
        }
    }

    /// State, or `"N/A"`.
    pub fn state(&self) -> &str {
        match self {
            Place::Resolved { state, .. } => state,
            Place::Unresolved => UNRESOLVED_SENTINEL,
        }
    }

    /// City, or `"N/A"`.
    pub fn city(&self) -> &str {
        match self {
            Place::Resolved { city, .. } => city,
            Place::Unresolved => UNRESOLVED_SENTINEL,
        }
    }

    /// `country,state`
    pub fn location(&self) -> String {
        format!("{},{}", self.country(), self.state())
    }

    /// `country,state,city`
    pub fn location_extended(&self) -> String {
        format!("{},{},{}", self.country(), self.state(), self.city())
    }
}

/// OpenCage response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    pub components: GeocodeComponents,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeComponents {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}
