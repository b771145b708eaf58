//! Error types for the order resource.
//!
//! This is the caller-facing taxonomy for everything order-related:
//! `InvalidRequest` and `Unauthorized` are never worth retrying;
//! `TransientFailure` means the whole originating request may be retried
//! and no partial progress was made.

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The request is malformed or impossible: empty cart, unresolvable
    /// product, illegal state transition.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The acting principal lacks rights over the target order.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The referenced order does not exist.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// A dependency was unavailable or timed out mid-request. The whole
    /// request is safe to retry; nothing was committed.
    #[error("Transient failure: {0}")]
    TransientFailure(String),
}
