//! Integration tests for the wishlist console.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wishlist-console-integration-tests
//! ```
//!
//! No external service is needed: each test starts an in-memory stub of the
//! wishlist REST service ([`stub`]) on an ephemeral local port and drives a
//! [`Console`] against it through the real HTTP transport.
//!
//! # Test Categories
//!
//! - `wishlist_flows` - Wishlist create/retrieve/update/delete/search
//! - `item_flows` - Item actions and moving items between wishlists
//! - `transport` - Health, escaping and unreachable-service behavior

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod stub;

use wishlist_console::{ConfigError, Console, ConsoleConfig, ConsoleError, HttpTransport};

pub use stub::{StubServer, StubState};

/// A running stub plus a console configured to talk to it.
#[derive(Debug)]
pub struct TestContext {
    pub server: StubServer,
    pub console: Console<HttpTransport>,
}

/// Errors while setting up a [`TestContext`].
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Failed to start stub server: {0}")]
    Bind(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Console(#[from] ConsoleError),
}

impl TestContext {
    /// Start a fresh stub and a console pointed at it.
    ///
    /// # Errors
    ///
    /// Returns error if the stub cannot bind or the console cannot be built.
    pub async fn new() -> Result<Self, SetupError> {
        let server = StubServer::start().await?;
        let console = console_for(&server.api_url())?;
        Ok(Self { server, console })
    }

    /// The stub's data and request log.
    #[must_use]
    pub const fn stub(&self) -> &StubState {
        self.server.state()
    }
}

/// Build a console for the service at `api_url`, ignoring the environment.
///
/// # Errors
///
/// Returns error if the URL is invalid or the client cannot be built.
pub fn console_for(api_url: &str) -> Result<Console<HttpTransport>, SetupError> {
    let config = ConsoleConfig::from_lookup(|_| None)?.with_api_url(api_url)?;
    Ok(Console::from_config(&config)?)
}
