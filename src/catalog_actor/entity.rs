//! ActorEntity implementation for the catalog [`Product`].

use crate::catalog_actor::CatalogError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ();
    type ActionResult = ();
    type Filter = ();
    type Context = ();
    type Error = CatalogError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, CatalogError> {
        if params.name.trim().is_empty() {
            return Err(CatalogError::InvalidProduct(
                "product name must not be empty".to_string(),
            ));
        }
        if params.vendor_id.is_empty() {
            return Err(CatalogError::InvalidProduct(
                "product must be owned by a vendor".to_string(),
            ));
        }
        Ok(Self {
            id,
            vendor_id: params.vendor_id,
            name: params.name,
            price_cents: params.price_cents,
            image_ref: params.image_ref,
        })
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), CatalogError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price_cents) = update.price_cents {
            self.price_cents = price_cents;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), CatalogError> {
        Ok(())
    }
}
