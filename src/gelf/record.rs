//! The enriched record sent to Graylog for every measurement result.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::atlas::MeasurementResult;
use crate::config::{GELF_LEVEL_INFO, GELF_SOURCE_HOST};
use crate::geocode::Place;

/// One measurement result with its probe's location attached.
///
/// Field names are the GELF keys; additional fields carry the `_ripe_atlas_`
/// prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtlasRecord {
    /// Summary line
    pub short_message: String,
    /// Source host tag
    pub host: String,
    /// Syslog severity
    pub level: u8,
    /// Measurement time, Unix seconds
    pub timestamp: i64,
    /// Probe id
    #[serde(rename = "_ripe_atlas_prbid")]
    pub probe_id: i64,
    /// Destination address
    #[serde(rename = "_ripe_atlas_dst_addr")]
    pub dst_addr: String,
    /// Source address
    #[serde(rename = "_ripe_atlas_src_addr")]
    pub src_addr: String,
    /// Measurement type
    #[serde(rename = "_ripe_atlas_type")]
    pub kind: String,
    /// Protocol
    #[serde(rename = "_ripe_atlas_proto")]
    pub proto: String,
    /// Packets sent
    #[serde(rename = "_ripe_atlas_sent_pkts")]
    pub sent_pkts: u32,
    /// Packets received
    #[serde(rename = "_ripe_atlas_rcvd_pkts")]
    pub rcvd_pkts: u32,
    /// Probe country code
    #[serde(rename = "_ripe_atlas_country")]
    pub country_code: String,
    /// `country,state`
    #[serde(rename = "_ripe_atlas_location")]
    pub location: String,
    /// `country,state,city`
    #[serde(rename = "_ripe_atlas_location_extended")]
    pub location_extended: String,
    /// Average RTT in ms
    #[serde(rename = "_ripe_atlas_avg_rtt")]
    pub avg_rtt: f64,
    /// Maximum RTT in ms
    #[serde(rename = "_ripe_atlas_max_rtt")]
    pub max_rtt: f64,
    /// Minimum RTT in ms
    #[serde(rename = "_ripe_atlas_min_rtt")]
    pub min_rtt: f64,
}

impl AtlasRecord {
    /// Assembles the record for `result` measured by a probe in `country_code`
    /// at `place`.
    pub fn new(result: &MeasurementResult, country_code: &str, place: &Place) -> Self {
        Self {
            short_message: format!("RIPE Atlas Data of Probe {}", result.prb_id),
            host: GELF_SOURCE_HOST.to_string(),
            level: GELF_LEVEL_INFO,
            timestamp: result.timestamp,
            probe_id: result.prb_id,
            dst_addr: result.dst_addr.clone(),
            src_addr: result.from.clone(),
            kind: result.kind.clone(),
            proto: result.proto.clone(),
            sent_pkts: result.sent,
            rcvd_pkts: result.rcvd,
            country_code: country_code.to_string(),
            location: place.location(),
            location_extended: place.location_extended(),
            avg_rtt: result.avg,
            max_rtt: result.max,
            min_rtt: result.min,
        }
    }

    /// Flattens the record into the field map the GELF client sends.
    pub fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(serde::ser::Error::custom("record did not serialize to an object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> MeasurementResult {
        MeasurementResult {
            prb_id: 100,
            timestamp: 1_700_000_000,
            dst_addr: "193.0.14.129".to_string(),
            from: "192.0.2.10".to_string(),
            kind: "ping".to_string(),
            proto: "ICMP".to_string(),
            sent: 3,
            rcvd: 3,
            avg: 12.5,
            max: 13.1,
            min: 11.9,
        }
    }

    #[test]
    fn test_record_fields() {
        let place = Place::Resolved {
            country: "Netherlands".to_string(),
            state: "NH".to_string(),
            city: "Amsterdam".to_string(),
        };
        let fields = AtlasRecord::new(&sample_result(), "NL", &place)
            .to_fields()
            .unwrap();

        assert_eq!(fields["short_message"], "RIPE Atlas Data of Probe 100");
        assert_eq!(fields["host"], "ripe-atlas");
        assert_eq!(fields["level"], 6);
        assert_eq!(fields["timestamp"], 1_700_000_000i64);
        assert_eq!(fields["_ripe_atlas_prbid"], 100);
        assert_eq!(fields["_ripe_atlas_dst_addr"], "193.0.14.129");
        assert_eq!(fields["_ripe_atlas_src_addr"], "192.0.2.10");
        assert_eq!(fields["_ripe_atlas_type"], "ping");
        assert_eq!(fields["_ripe_atlas_proto"], "ICMP");
        assert_eq!(fields["_ripe_atlas_sent_pkts"], 3);
        assert_eq!(fields["_ripe_atlas_rcvd_pkts"], 3);
        assert_eq!(fields["_ripe_atlas_country"], "NL");
        assert_eq!(fields["_ripe_atlas_location"], "Netherlands,NH");
        assert_eq!(
            fields["_ripe_atlas_location_extended"],
            "Netherlands,NH,Amsterdam"
        );
        assert_eq!(fields["_ripe_atlas_avg_rtt"], 12.5);
        assert_eq!(fields["_ripe_atlas_max_rtt"], 13.1);
        assert_eq!(fields["_ripe_atlas_min_rtt"], 11.9);
        assert_eq!(fields.len(), 17);
    }

    #[test]
    fn test_record_for_unresolved_place() {
        let record = AtlasRecord::new(&sample_result(), "NL", &Place::Unresolved);
        assert_eq!(record.location, "N/A,N/A");
        assert_eq!(record.location_extended, "N/A,N/A,N/A");
        assert_eq!(record.country_code, "NL");
    }
}
