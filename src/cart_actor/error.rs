//! Error types for the cart store.

use thiserror::Error;

/// Errors that can occur during cart operations.
///
/// Cart mutations themselves cannot fail (absent lines and empty carts
/// are valid states); only the store being unreachable is an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The cart store is unreachable.
    #[error("Cart store unavailable: {0}")]
    Unavailable(String),
}
