//! InfluxDB integration
//!
//! Writes single points to the InfluxDB v2 HTTP write API using the line
//! protocol. One request per point; there is no client-side batching.

pub mod client;
pub mod line_protocol;

pub use client::{InfluxClient, InfluxConfig, InfluxError};
pub use line_protocol::encode_point;
