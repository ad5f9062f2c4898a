//! RIPE Atlas API data structures.

use serde::{Deserialize, Serialize};

/// One result object from `/measurements/{id}/results/`.
///
/// Only the fields forwarded to Graylog are decoded; a missing one makes the
/// whole response malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Probe that produced the result
    pub prb_id: i64,
    /// Unix timestamp of the measurement
    pub timestamp: i64,
    /// Destination address
    pub dst_addr: String,
    /// Source address as seen by the probe
    pub from: String,
    /// Measurement type (`ping`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Protocol (`ICMP`, `UDP`, `TCP`)
    pub proto: String,
    /// Packets sent
    pub sent: u32,
    /// Packets received
    pub rcvd: u32,
    /// Average round-trip time in ms (-1 when nothing came back)
    pub avg: f64,
    /// Maximum round-trip time in ms
    pub max: f64,
    /// Minimum round-trip time in ms
    pub min: f64,
}

/// Where a probe sits.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeLocation {
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
    /// ISO country code
    pub country_code: String,
}

/// Subset of `/probes/{id}/`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProbeDetails {
    pub geometry: ProbeGeometry,
    pub country_code: String,
}

/// GeoJSON point, `[longitude, latitude]`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProbeGeometry {
    pub coordinates: (f64, f64),
}

impl From<ProbeDetails> for ProbeLocation {
    fn from(details: ProbeDetails) -> Self {
        let (longitude, latitude) = details.geometry.coordinates;
        Self {
            latitude,
            longitude,
            country_code: details.country_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ping_result() {
        let json = r#"{
            "fw": 5020, "lts": 12, "dst_name": "193.0.14.129",
            "prb_id": 100, "timestamp": 1700000000,
            "dst_addr": "193.0.14.129", "from": "192.0.2.10",
            "type": "ping", "proto": "ICMP",
            "sent": 3, "rcvd": 3, "avg": 12.5, "max": 13.1, "min": 11.9,
            "result": [{"rtt": 12.5}, {"rtt": 13.1}, {"rtt": 11.9}]
        }"#;
        let result: MeasurementResult = serde_json::from_str(json).expect("decode");
        assert_eq!(result.prb_id, 100);
        assert_eq!(result.kind, "ping");
        assert_eq!(result.from, "192.0.2.10");
        assert_eq!(result.rcvd, 3);
        assert_eq!(result.min, 11.9);
    }

    #[test]
    fn test_decode_result_missing_field_fails() {
        let json = r#"{"prb_id": 100, "timestamp": 1700000000}"#;
        assert!(serde_json::from_str::<MeasurementResult>(json).is_err());
    }

    #[test]
    fn test_probe_details_coordinates_are_lon_lat() {
        let json = r#"{
            "id": 100,
            "country_code": "NL",
            "geometry": {"type": "Point", "coordinates": [4.9041, 52.3676]}
        }"#;
        let details: ProbeDetails = serde_json::from_str(json).expect("decode");
        let location = ProbeLocation::from(details);
        assert_eq!(location.longitude, 4.9041);
        assert_eq!(location.latitude, 52.3676);
        assert_eq!(location.country_code, "NL");
    }
}
