//! Wishlist Console library.
//!
//! Binds the wishlist and item forms of the admin console to the wishlist
//! REST service. Every user action follows the same path:
//!
//! 1. The shared [`NotificationSink`] is cleared
//! 2. A request is built from the current form ([`request`])
//! 3. The request is sent through a [`Transport`]
//! 4. The response is reconciled back into the form and result table
//!    ([`reconcile`]) and exactly one notification is set
//!
//! Both resources share one generic [`ResourceController`], parameterized by
//! the field-mapping tables in [`resource`].
//!
//! ```rust,no_run
//! use wishlist_console::{Console, ConsoleConfig};
//!
//! # async fn run() -> Result<(), wishlist_console::ConsoleError> {
//! let config = ConsoleConfig::from_env()?;
//! let console = Console::from_config(&config)?;
//!
//! console.wishlists().edit(|form| form.customer_id = "42".to_string());
//! console.wishlists().search().await;
//!
//! if let Some(notification) = console.notification() {
//!     tracing::info!(%notification, "search settled");
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod notification;
pub mod reconcile;
pub mod request;
pub mod resource;
pub mod slot;
pub mod table;
pub mod transport;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, ConsoleConfig, LogFormat};
pub use console::{Console, HealthReport};
pub use controller::{ItemController, ResourceController, Settled, WishlistController};
pub use error::ConsoleError;
pub use notification::{Notification, NotificationSink, Severity};
pub use request::{ApiRequest, HttpMethod, QueryParams, ValidationError};
pub use resource::{ItemResource, Resource, WishlistResource};
pub use table::{ResultTable, TableColumn};
pub use transport::{ApiResponse, HttpTransport, Transport, TransportError};
pub use view::{ItemForm, ItemInputs, ResourceView, WishlistForm};
