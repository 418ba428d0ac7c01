//! HTTP transport seam
//!
//! The client only needs "send one request, get one response". Keeping that
//! behind a trait lets tests count or intercept requests without a network.

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, Request, Response};

/// Executes a single HTTP request
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    /// Send the request and return the response head with an unread body
    ///
    /// An `Err` means no response was obtained at all.
    async fn execute(&self, request: Request) -> Result<Response, reqwest::Error>;
}

#[async_trait]
impl HttpTransport for Client {
    async fn execute(&self, request: Request) -> Result<Response, reqwest::Error> {
        Self::execute(self, request).await
    }
}
