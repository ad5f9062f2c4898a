//! GELF 1.1 over UDP.
//!
//! Payloads are JSON, optionally zlib-compressed. A payload larger than one
//! datagram is split into chunks: `0x1e 0x0f`, an 8-byte message id, the
//! chunk's sequence number and the chunk count, then the data.

use std::io::Write;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::{debug, trace};
use serde_json::{Map, Value};
use tokio::net::UdpSocket;

use crate::config::{
    GELF_CHUNK_HEADER_SIZE, GELF_CHUNK_MAGIC, GELF_MAX_CHUNKS, GELF_MAX_DATAGRAM_SIZE,
    GELF_SOURCE_HOST, GELF_VERSION,
};
use crate::error_handling::GelfError;

/// Sends GELF messages to one receiver.
///
/// Delivery is fire-and-forget: the socket is unconnected, so an absent
/// receiver is not reported.
#[derive(Debug)]
pub struct GelfClient {
    socket: UdpSocket,
    target: SocketAddr,
    compress: bool,
    max_datagram_size: usize,
}

impl GelfClient {
    /// Resolves `host:port` and binds a local socket of the matching family.
    ///
    /// See [`pick_target`] for which of the resolved addresses is used.
    pub async fn connect(host: &str, port: u16, compress: bool) -> Result<Self, GelfError> {
        let target =
            pick_target(tokio::net::lookup_host((host, port)).await?).ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("GELF host {host} did not resolve"),
                )
            })?;
        debug!("GELF target for {host}:{port} is {target}");

        let bind_addr: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr).await?;

        Ok(Self {
            socket,
            target,
            compress,
            max_datagram_size: GELF_MAX_DATAGRAM_SIZE,
        })
    }

    /// Overrides the datagram size used to decide on chunking.
    pub fn with_max_datagram_size(mut self, size: usize) -> Self {
        self.max_datagram_size = size.max(GELF_CHUNK_HEADER_SIZE + 1);
        self
    }

    /// Receiver address.
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Sends one message built from `fields`, returning the number of
    /// datagrams written.
    ///
    /// `version` is always set to `1.1`; `host` is filled in when missing.
    pub async fn log(&self, fields: Map<String, Value>) -> Result<usize, GelfError> {
        let payload = encode_payload(fields, self.compress)?;

        if payload.len() <= self.max_datagram_size {
            self.socket.send_to(&payload, self.target).await?;
            trace!("Sent {}-byte GELF datagram to {}", payload.len(), self.target);
            return Ok(1);
        }

        let message_id: [u8; 8] = rand::random();
        let chunks = chunk_payload(&payload, self.max_datagram_size, message_id)?;
        for chunk in &chunks {
            self.socket.send_to(chunk, self.target).await?;
        }
        trace!(
            "Sent {}-byte GELF message to {} in {} chunks",
            payload.len(),
            self.target,
            chunks.len()
        );
        Ok(chunks.len())
    }
}

/// Picks the receiver among the resolved addresses of the GELF host.
///
/// The first IPv4 address wins; IPv6 is used only when there is no IPv4
/// address. Sends are unconnected, so a receiver listening on `0.0.0.0` would
/// never see datagrams sent to `::1` and nothing would report it.
pub fn pick_target<I>(addrs: I) -> Option<SocketAddr>
where
    I: IntoIterator<Item = SocketAddr>,
{
    let mut first_v6 = None;
    for addr in addrs {
        if addr.is_ipv4() {
            return Some(addr);
        }
        first_v6.get_or_insert(addr);
    }
    first_v6
}

/// Serializes a message, stamping protocol fields, and compresses it if asked.
pub fn encode_payload(mut fields: Map<String, Value>, compress: bool) -> Result<Vec<u8>, GelfError> {
    fields.insert("version".to_string(), Value::from(GELF_VERSION));
    fields
        .entry("host")
        .or_insert_with(|| Value::from(GELF_SOURCE_HOST));

    let json = serde_json::to_vec(&fields)?;
    if !compress {
        return Ok(json);
    }

    let mut encoder = ZlibEncoder::new(Vec::with_capacity(json.len() / 2), Compression::default());
    encoder.write_all(&json)?;
    Ok(encoder.finish()?)
}

/// Splits `payload` into GELF chunks of at most `max_datagram_size` bytes.
pub fn chunk_payload(
    payload: &[u8],
    max_datagram_size: usize,
    message_id: [u8; 8],
) -> Result<Vec<Vec<u8>>, GelfError> {
    let data_per_chunk = max_datagram_size.saturating_sub(GELF_CHUNK_HEADER_SIZE).max(1);
    let count = payload.len().div_ceil(data_per_chunk).max(1);
    if count > GELF_MAX_CHUNKS {
        return Err(GelfError::TooManyChunks {
            size: payload.len(),
            chunks: count,
            max: GELF_MAX_CHUNKS,
        });
    }

    Ok(payload
        .chunks(data_per_chunk)
        .enumerate()
        .map(|(seq, data)| {
            let mut chunk = Vec::with_capacity(GELF_CHUNK_HEADER_SIZE + data.len());
            chunk.extend_from_slice(&GELF_CHUNK_MAGIC);
            chunk.extend_from_slice(&message_id);
            // count <= 128, so both fit in a byte
            chunk.push(seq as u8);
            chunk.push(count as u8);
            chunk.extend_from_slice(data);
            chunk
        })
        .collect())
}
