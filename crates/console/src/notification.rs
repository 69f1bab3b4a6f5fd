//! The single-line status area shared by both controllers.
//!
//! The sink is cleared when an action is triggered and set exactly once when
//! it settles. No history is kept.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

/// Which path produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A status message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    /// Create a success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    /// Create an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Shared handle to the current notification.
#[derive(Debug, Clone, Default)]
pub struct NotificationSink {
    current: Arc<Mutex<Option<Notification>>>,
}

impl NotificationSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the status area.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// Replace the status area with `notification`.
    pub fn set(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => info!(message = %notification.message, "Notification"),
            Severity::Error => warn!(message = %notification.message, "Error notification"),
        }
        *self.lock() = Some(notification);
    }

    /// The message currently shown, if any.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Notification>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_previous_message() {
        let sink = NotificationSink::new();
        sink.set(Notification::success("Success"));
        sink.set(Notification::error("Server error!"));

        assert_eq!(sink.current(), Some(Notification::error("Server error!")));
    }

    #[test]
    fn test_clear_empties_sink() {
        let sink = NotificationSink::new();
        sink.set(Notification::success("Success"));
        sink.clear();
        assert_eq!(sink.current(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let sink = NotificationSink::new();
        let other = sink.clone();
        other.set(Notification::success("Wishlist has been created!"));
        assert_eq!(
            sink.current().map(|n| n.message),
            Some("Wishlist has been created!".to_string())
        );
    }
}
