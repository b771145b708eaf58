//! Order resource: creation as per-vendor groups at checkout, plus the
//! fulfillment state machine that governs every later mutation.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{CatalogClient, NotificationClient, OrderClient};
use crate::framework::ResourceActor;
use crate::model::Order;
use std::time::Duration;

/// Dependencies injected into the order actor at `run()` time.
///
/// The notification client is held by the actor itself (not the order
/// client) because notices are written inside the same commit as the
/// mutation that causes them.
#[derive(Clone)]
pub struct OrderContext {
    pub notifications: NotificationClient,
}

/// Creates a new order actor and its client.
///
/// The returned actor must be run with an [`OrderContext`]; the client
/// needs the catalog for checkout-time resolution and a timeout bounding
/// each external step of checkout.
pub fn new(
    buffer_size: usize,
    catalog: CatalogClient,
    checkout_timeout: Duration,
) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = OrderClient::new(generic_client, catalog, checkout_timeout);
    (actor, client)
}
