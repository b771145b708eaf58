//! Notification sink resource: the durable mailbox actor.

pub mod entity;
pub mod error;

pub use entity::NotificationAction;
pub use error::*;

use crate::clients::NotificationClient;
use crate::framework::ResourceActor;
use crate::model::Notification;

/// Creates a new notification actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Notification>, NotificationClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, NotificationClient::new(generic_client))
}
