//! # ActorClient Trait
//!
//! Common interface for resource-specific clients: each wraps a generic
//! [`ResourceClient`] and maps [`FrameworkError`] into its own error enum,
//! inheriting a default `get` implementation.
//!
//! Deliberately no default `delete`: orders and notifications are never
//! deleted in this system (cancellation is a status, mailboxes only flip
//! read flags), so deletion stays off the domain clients entirely.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// Implementors provide access to the inner generic client plus the error
/// mapping; `get` comes for free.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }
}
