//! Client for the cart store actor.

use crate::cart_actor::{CartError, CartRequest};
use crate::model::{BuyerId, CartView, ItemSnapshot, ProductId};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for interacting with the [`CartStore`](crate::cart_actor::CartStore).
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    /// Set the absolute quantity of a product line (0 removes it). The
    /// snapshot is stored as-is; it is display data, re-validated at
    /// checkout.
    #[instrument(skip(self, snapshot))]
    pub async fn upsert_item(
        &self,
        buyer_id: impl Into<BuyerId> + std::fmt::Debug,
        product_id: ProductId,
        quantity: u32,
        snapshot: ItemSnapshot,
    ) -> Result<CartView, CartError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CartRequest::UpsertItem {
                buyer_id: buyer_id.into(),
                product_id,
                quantity,
                snapshot,
                respond_to,
            })
            .await
            .map_err(|e| CartError::Unavailable(e.to_string()))?;
        response
            .await
            .map_err(|e| CartError::Unavailable(e.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        buyer_id: impl Into<BuyerId> + std::fmt::Debug,
        product_id: ProductId,
    ) -> Result<CartView, CartError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CartRequest::RemoveItem {
                buyer_id: buyer_id.into(),
                product_id,
                respond_to,
            })
            .await
            .map_err(|e| CartError::Unavailable(e.to_string()))?;
        response
            .await
            .map_err(|e| CartError::Unavailable(e.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn get_cart(
        &self,
        buyer_id: impl Into<BuyerId> + std::fmt::Debug,
    ) -> Result<CartView, CartError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CartRequest::GetCart {
                buyer_id: buyer_id.into(),
                respond_to,
            })
            .await
            .map_err(|e| CartError::Unavailable(e.to_string()))?;
        response
            .await
            .map_err(|e| CartError::Unavailable(e.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn clear(
        &self,
        buyer_id: impl Into<BuyerId> + std::fmt::Debug,
    ) -> Result<(), CartError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CartRequest::Clear {
                buyer_id: buyer_id.into(),
                respond_to,
            })
            .await
            .map_err(|e| CartError::Unavailable(e.to_string()))?;
        response
            .await
            .map_err(|e| CartError::Unavailable(e.to_string()))
    }
}
