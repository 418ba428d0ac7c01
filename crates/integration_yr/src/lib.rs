//! Met.no (Yr) weather integration
//!
//! Client for the locationforecast 2.0 API (<https://api.met.no>).
//! Fetches the `complete` product for a single position.

pub mod client;
pub mod observer;
pub mod transport;

pub use client::{FetchOutcome, YrClient, YrConfig, YrError};
pub use observer::{RequestObserver, TracingRequestObserver};
pub use transport::HttpTransport;
