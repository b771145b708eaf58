//! Catalog resource: the in-process stand-in for the external catalog
//! service, reached by the order side only through
//! [`CatalogClient::resolve_item`](crate::clients::CatalogClient::resolve_item).

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CatalogClient;
use crate::framework::ResourceActor;
use crate::model::Product;

/// Creates a new catalog actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, CatalogClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CatalogClient::new(generic_client))
}
