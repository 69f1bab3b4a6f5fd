//! Transport seam between the controllers and the wishlist service.
//!
//! Controllers only see [`Transport`]. The production implementation is
//! [`HttpTransport`]; tests substitute a scripted fake.

mod http;

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

pub use http::HttpTransport;

use crate::request::ApiRequest;

/// Raw response from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body. Empty or non-JSON bodies are `None`.
    pub body: Option<Value>,
}

impl ApiResponse {
    #[must_use]
    pub const fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// The `message` field of a JSON object body.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.as_ref()?.get("message")?.as_str()
    }
}

/// Errors that occur below the HTTP status line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// The service answered with a non-success status.
    #[error("Service returned status {0}")]
    Status(u16),

    /// The response body did not have the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Sends one request and waits for its response.
///
/// Implementations do not retry, time out or cancel: a request either
/// resolves or never resolves.
pub trait Transport: Send + Sync + 'static {
    /// Send `request` to the service.
    ///
    /// Any HTTP status is a successful send; only network-level failures are
    /// errors.
    fn send(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}
