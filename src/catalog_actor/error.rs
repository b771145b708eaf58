//! Error types for the catalog resource.

use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested product does not exist.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product data provided is invalid.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// The catalog store is unreachable.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}
