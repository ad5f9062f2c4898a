//! Graylog output.

mod client;
mod record;

pub use client::{chunk_payload, encode_payload, pick_target, GelfClient};
pub use record::AtlasRecord;
