//! The console: both controllers wired to one transport and one sink.

use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;

use crate::config::ConsoleConfig;
use crate::controller::{ItemController, WishlistController};
use crate::error::ConsoleError;
use crate::notification::{Notification, NotificationSink};
use crate::request::ApiRequest;
use crate::transport::{HttpTransport, Transport, TransportError};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: u16,
    pub message: String,
}

/// Wishlist and item controllers sharing one notification sink.
pub struct Console<T> {
    wishlists: WishlistController<T>,
    items: ItemController<T>,
    sink: NotificationSink,
    transport: Arc<T>,
}

impl<T> Clone for Console<T> {
    fn clone(&self) -> Self {
        Self {
            wishlists: self.wishlists.clone(),
            items: self.items.clone(),
            sink: self.sink.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> std::fmt::Debug for Console<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("wishlists", &self.wishlists)
            .field("items", &self.items)
            .field("notification", &self.sink.current())
            .finish_non_exhaustive()
    }
}

impl Console<HttpTransport> {
    /// Create a console talking HTTP to the configured service.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        Ok(Self::new(HttpTransport::from_config(config)?))
    }
}

impl<T> Console<T> {
    /// Create a console over `transport` with empty views.
    #[must_use]
    pub fn new(transport: T) -> Self {
        let transport = Arc::new(transport);
        let sink = NotificationSink::new();
        Self {
            wishlists: WishlistController::new(Arc::clone(&transport), sink.clone()),
            items: ItemController::new(Arc::clone(&transport), sink.clone()),
            sink,
            transport,
        }
    }

    #[must_use]
    pub const fn wishlists(&self) -> &WishlistController<T> {
        &self.wishlists
    }

    #[must_use]
    pub const fn items(&self) -> &ItemController<T> {
        &self.items
    }

    /// The message currently shown, if any.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        self.sink.current()
    }

    /// Shared notification sink.
    #[must_use]
    pub const fn sink(&self) -> &NotificationSink {
        &self.sink
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> Console<T> {
    /// Ask the service whether it is up.
    ///
    /// Does not touch the sink or either view.
    ///
    /// # Errors
    ///
    /// Returns error if the service is unreachable, answers with a
    /// non-success status, or sends an unexpected body.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthReport, TransportError> {
        let response = self
            .transport
            .send(&ApiRequest::get("/health".to_string()))
            .await?;

        if !response.is_success() {
            return Err(TransportError::Status(response.status));
        }

        let body = response
            .body
            .ok_or_else(|| TransportError::Decode("empty body".to_string()))?;
        serde_json::from_value(body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
