//! # Generic Messages
//!
//! Message types exchanged between [`ResourceClient`] and [`ResourceActor`].
//!
//! [`ResourceClient`]: crate::framework::ResourceClient
//! [`ResourceActor`]: crate::framework::ResourceActor

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map to standard CRUD operations plus three extensions this
/// system needs:
///
/// - **CreateGroup**: all-or-nothing batch insert. Checkout persists one
///   order per vendor as a single unit, and the notification sink persists
///   the companion notices the same way.
/// - **List**: filtered scan of the store, for mailbox reads and order
///   queries.
/// - **Action**: resource-specific logic that doesn't fit the CRUD model
///   (status transitions, payment application, mark-read).
///
/// The request enum is generic over `T: ActorEntity`, so payload types are
/// checked at compile time per resource.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    /// Insert a batch of entities atomically: every entity is constructed
    /// (and the group hook run) before any of them becomes visible, and a
    /// failure anywhere leaves the store untouched.
    CreateGroup {
        params: Vec<T::Create>,
        respond_to: Response<Vec<T::Id>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete { id: T::Id, respond_to: Response<()> },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
