//! Generic actor substrate for the order system.
//!
//! Every stateful store in this crate (catalog, orders, notifications) is
//! owned by a [`ResourceActor`] that processes requests sequentially from an
//! mpsc channel and replies over oneshot channels. Sequential processing
//! within an actor is what gives single-order mutations their
//! compare-and-set discipline, and what makes a group insert atomic with
//! respect to every other reader of that store.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
