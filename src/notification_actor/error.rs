//! Error types for the notification sink.

use thiserror::Error;

/// Errors that can occur during notification operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    /// The requested notification was not found.
    #[error("Notification not found: {0}")]
    NotFound(String),

    /// The caller is not the notification's recipient.
    #[error("Recipient mismatch: {0}")]
    RecipientMismatch(String),

    /// The notification data provided is invalid.
    #[error("Invalid notification: {0}")]
    Invalid(String),

    /// The sink is unreachable.
    #[error("Notification sink unavailable: {0}")]
    Unavailable(String),
}
