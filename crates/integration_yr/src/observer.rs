//! Request observers
//!
//! Log points of the client are delivered to an injected observer instead of
//! a process-wide logger.

use std::fmt::Debug;

use reqwest::{StatusCode, Url};
use tracing::{debug, info, warn};

/// Receives the client's request/response events
pub trait RequestObserver: Send + Sync + Debug {
    /// A request is about to be sent
    fn request_issued(&self, _url: &Url) {}

    /// A response head was received
    fn response_received(&self, _url: &Url, _status: StatusCode) {}
}

/// Observer that emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRequestObserver;

impl RequestObserver for TracingRequestObserver {
    fn request_issued(&self, url: &Url) {
        debug!(url = %url, "Requesting forecast");
    }

    fn response_received(&self, url: &Url, status: StatusCode) {
        if status == StatusCode::OK {
            info!(url = %url, status = status.as_u16(), "Forecast response received");
        } else {
            warn!(url = %url, status = status.as_u16(), "Forecast request returned non-OK status");
        }
    }
}
