// Shared helpers for integration tests: fake Atlas/OpenCage endpoints,
// a GELF receiver, and a Config pointing at both.

use std::path::Path;
use std::time::Duration;

use atlas_gelf::{Config, LogFormat, LogLevel};
use serde_json::{json, Value};
use tokio::net::UdpSocket;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fixed reference time for runs.
#[allow(dead_code)]
pub const NOW: i64 = 1_700_000_000;

/// Binds a UDP socket standing in for Graylog.
pub async fn gelf_receiver() -> (UdpSocket, u16) {
    let socket = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind GELF receiver");
    let port = socket.local_addr().expect("local addr").port();
    (socket, port)
}

/// Receives one uncompressed, unchunked GELF message.
#[allow(dead_code)]
pub async fn recv_gelf(socket: &UdpSocket) -> Value {
    let mut buf = vec![0u8; 65_535];
    let (len, _) = tokio::time::timeout(Duration::from_secs(5), socket.recv_from(&mut buf))
        .await
        .expect("GELF message should arrive")
        .expect("recv_from failed");
    serde_json::from_slice(&buf[..len]).expect("GELF payload should be JSON")
}

/// Asserts that nothing arrives within a short grace period.
#[allow(dead_code)]
pub async fn assert_no_gelf(socket: &UdpSocket) {
    let mut buf = vec![0u8; 65_535];
    let received =
        tokio::time::timeout(Duration::from_millis(300), socket.recv_from(&mut buf)).await;
    assert!(received.is_err(), "no GELF message expected");
}

/// Config pointing every collaborator at the mock server and the receiver.
pub fn test_config(server: &MockServer, gelf_port: u16, cache_path: &Path) -> Config {
    Config {
        transport_host: "127.0.0.1".to_string(),
        transport_port: gelf_port,
        gelf_compress: false,
        geocode_api_key: "test-key".to_string(),
        geocode_api_url: format!("{}/geocode/v1/json", server.uri()),
        atlas_api_url: format!("{}/api/v2", server.uri()),
        cache_path: cache_path.to_path_buf(),
        timeout_seconds: 1,
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
    }
}

/// A ping result as returned by the Atlas results endpoint.
pub fn ping_result(probe_id: i64, timestamp: i64) -> Value {
    json!({
        "fw": 5020,
        "prb_id": probe_id,
        "timestamp": timestamp,
        "dst_addr": "193.0.14.129",
        "dst_name": "k.root-servers.net",
        "from": "192.0.2.10",
        "type": "ping",
        "proto": "ICMP",
        "sent": 3,
        "rcvd": 3,
        "avg": 12.5,
        "max": 13.1,
        "min": 11.9,
        "result": [{"rtt": 12.5}, {"rtt": 13.1}, {"rtt": 11.9}]
    })
}

/// Mounts a probe metadata response.
#[allow(dead_code)]
pub async fn mount_probe(
    server: &MockServer,
    probe_id: i64,
    longitude: f64,
    latitude: f64,
    country_code: &str,
    expected_calls: u64,
) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/probes/{probe_id}/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": probe_id,
            "country_code": country_code,
            "geometry": {"type": "Point", "coordinates": [longitude, latitude]}
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mounts an OpenCage response for any query.
#[allow(dead_code)]
pub async fn mount_geocode(
    server: &MockServer,
    country: &str,
    state: &str,
    city: &str,
    expected_calls: u64,
) {
    Mock::given(method("GET"))
        .and(path("/geocode/v1/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"components": {"country": country, "state": state, "city": city}}],
            "status": {"code": 200, "message": "OK"}
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}
