//! HTTP transport backed by `reqwest`.

use std::sync::Arc;

use reqwest::{Client, Method};
use tracing::{debug, instrument};
use url::Url;

use super::{ApiResponse, Transport, TransportError};
use crate::config::ConsoleConfig;
use crate::request::{ApiRequest, HttpMethod};

/// Transport that talks JSON over HTTP to the wishlist service.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Arc<HttpTransportInner>,
}

#[derive(Debug)]
struct HttpTransportInner {
    client: Client,
    /// Service root, e.g. `http://localhost:8080/api`, without trailing slash.
    base: String,
}

impl HttpTransport {
    /// Create a transport for the service rooted at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(api_url: &Url) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("wishlist-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(HttpTransportInner {
                client,
                base: api_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Create a transport from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, TransportError> {
        Self::new(&config.api_url)
    }

    /// Absolute URL for a request target such as `/wishlists?name=x`.
    #[must_use]
    pub fn url_for(&self, target: &str) -> String {
        format!("{}{target}", self.inner.base)
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, target = %request.target()))]
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request.target());

        let mut builder = self.inner.client.request(request.method.into(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let body = serde_json::from_slice(&bytes).ok();
        debug!(status, has_body = body.is_some(), "Response received");

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_keeps_api_prefix() {
        let url = Url::parse("http://localhost:8080/api").unwrap();
        let transport = HttpTransport::new(&url).unwrap();
        assert_eq!(
            transport.url_for("/wishlists/7"),
            "http://localhost:8080/api/wishlists/7"
        );
    }

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let url = Url::parse("http://localhost:8080/").unwrap();
        let transport = HttpTransport::new(&url).unwrap();
        assert_eq!(
            transport.url_for("/wishlists?name=x"),
            "http://localhost:8080/wishlists?name=x"
        );
    }
}
