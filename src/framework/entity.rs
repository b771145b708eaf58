//! # ActorEntity Trait
//!
//! The contract every store-managed resource (Product, Order, Notification)
//! must implement to be hosted by the generic [`ResourceActor`]. Associated
//! types pin down the DTOs per resource, so an `OrderCreate` can never be
//! sent to the catalog actor; lifecycle hooks let an entity run validation
//! and side effects with injected dependencies.
//!
//! # Provided Methods (Hooks)
//! [`ActorEntity::on_create`], [`ActorEntity::on_create_group`] and
//! [`ActorEntity::on_delete`] have default no-op implementations; override
//! them only where the resource needs the behavior.
//!
//! [`ResourceActor`]: crate::framework::ResourceActor

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by a
/// [`ResourceActor`](crate::framework::ResourceActor).
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks can call other actors. The
/// `Context` type carries those dependencies and is injected into every
/// hook at `run()` time ("late binding"), which keeps actor construction
/// free of circular wiring.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32> + 'static;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug + 'static;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug + 'static;

    /// Enum representing resource-specific operations (e.g. a status
    /// transition on an order).
    type Action: Send + Sync + Debug + 'static;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug + 'static;

    /// Predicate DTO for [`List`](crate::framework::ResourceRequest::List)
    /// scans. Use `()` for resources that are never listed.
    type Filter: Send + Sync + Debug + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity: one enum per actor, the union of
    /// everything its operations can reject with.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the ID and payload.
    /// Called synchronously, before any hook; rejecting here means the
    /// store is never touched.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity is selected by a [`List`] scan with `filter`.
    ///
    /// [`List`]: crate::framework::ResourceRequest::List
    fn matches(&self, filter: &Self::Filter) -> bool;

    // --- Lifecycle Hooks (Async) ---

    /// Called immediately after the entity is constructed, before it is
    /// stored. Use for validation or side effects against other actors.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called exactly once per group create, after every entity in the
    /// group has been constructed and before any of them is stored.
    ///
    /// An error here aborts the whole group: the store is left untouched.
    /// This is the hook that lets a resource attach companion writes (the
    /// order actor uses it to commit the new-order notification batch) to
    /// an all-or-nothing insert.
    async fn on_create_group(
        _items: &mut [Self],
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
