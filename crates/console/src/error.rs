//! Unified error handling for console setup.
//!
//! Actions never return errors: every failure of a user action is reported
//! through the notification sink. These errors only cover building a console.

use thiserror::Error;

use crate::config::ConfigError;
use crate::transport::TransportError;

/// Errors raised while wiring up a console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP transport could not be created or reached.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
