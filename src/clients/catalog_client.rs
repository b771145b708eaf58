//! Client for the catalog actor.

use crate::catalog_actor::CatalogError;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate, ResolvedItem};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the catalog actor.
///
/// The order side consumes exactly one method: [`resolve_item`]. Creation
/// and updates exist for the admin/vendor glue that seeds the catalog.
///
/// [`resolve_item`]: CatalogClient::resolve_item
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, product))]
    pub async fn create_product(&self, product: ProductCreate) -> Result<ProductId, CatalogError> {
        debug!(?product, "create_product called");
        self.inner.create(product).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, CatalogError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Authoritative price/name/vendor for one product, as of now.
    ///
    /// This is the resolution step checkout relies on; the caller's own
    /// price or vendor claims never enter the order.
    #[instrument(skip(self))]
    pub async fn resolve_item(&self, product_id: ProductId) -> Result<ResolvedItem, CatalogError> {
        debug!("Sending request");
        let product = self
            .inner
            .get(product_id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| CatalogError::NotFound(product_id.to_string()))?;
        Ok(ResolvedItem {
            product_id: product.id,
            vendor_id: product.vendor_id,
            name: product.name,
            unit_price_cents: product.price_cents,
            image_ref: product.image_ref,
        })
    }
}

#[async_trait]
impl ActorClient<Product> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CatalogError {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<CatalogError>() {
                Ok(err) => *err,
                Err(other) => CatalogError::Unavailable(other.to_string()),
            },
            FrameworkError::NotFound(id) => CatalogError::NotFound(id),
            other => CatalogError::Unavailable(other.to_string()),
        }
    }
}
