//! Cart store: a buyer-keyed actor outside the generic framework.
//!
//! Carts are keyed by external buyer identity with create-on-first-add
//! semantics, which does not fit the generated-id CRUD model, so this
//! store runs its own small message loop in the same style as
//! [`ResourceActor`](crate::framework::ResourceActor): a HashMap behind an
//! mpsc channel, requests processed sequentially, replies over oneshots.
//!
//! The store performs no catalog validation. Snapshots go stale on
//! purpose; checkout re-resolves every line.

pub mod error;

pub use error::*;

use crate::clients::CartClient;
use crate::model::{BuyerId, Cart, CartItem, CartView, ItemSnapshot, ProductId};
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Requests understood by the cart store.
#[derive(Debug)]
pub enum CartRequest {
    /// Set the absolute quantity for a product line, creating the cart
    /// and/or line as needed. Quantity 0 removes the line. Idempotent.
    UpsertItem {
        buyer_id: BuyerId,
        product_id: ProductId,
        quantity: u32,
        snapshot: ItemSnapshot,
        respond_to: oneshot::Sender<CartView>,
    },
    /// Remove a product line; absent lines are not an error.
    RemoveItem {
        buyer_id: BuyerId,
        product_id: ProductId,
        respond_to: oneshot::Sender<CartView>,
    },
    /// Current lines plus derived total; an empty cart is a valid state.
    GetCart {
        buyer_id: BuyerId,
        respond_to: oneshot::Sender<CartView>,
    },
    /// Drop the buyer's cart entirely.
    Clear {
        buyer_id: BuyerId,
        respond_to: oneshot::Sender<()>,
    },
}

/// The cart store actor: owns every buyer's pending selections.
pub struct CartStore {
    receiver: mpsc::Receiver<CartRequest>,
    carts: HashMap<BuyerId, Cart>,
}

impl CartStore {
    /// Creates a new `CartStore` and its client.
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            carts: HashMap::new(),
        };
        (store, CartClient::new(sender))
    }

    /// Runs the store's event loop until the channel closes.
    pub async fn run(mut self) {
        info!("Cart store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::UpsertItem {
                    buyer_id,
                    product_id,
                    quantity,
                    snapshot,
                    respond_to,
                } => {
                    debug!(buyer = %buyer_id, %product_id, quantity, "UpsertItem");
                    let view = self.upsert(buyer_id, product_id, quantity, snapshot);
                    let _ = respond_to.send(view);
                }
                CartRequest::RemoveItem {
                    buyer_id,
                    product_id,
                    respond_to,
                } => {
                    debug!(buyer = %buyer_id, %product_id, "RemoveItem");
                    if let Some(cart) = self.carts.get_mut(&buyer_id) {
                        cart.items.retain(|item| item.product_id != product_id);
                        cart.updated_at = Utc::now();
                    }
                    let _ = respond_to.send(self.view(&buyer_id));
                }
                CartRequest::GetCart {
                    buyer_id,
                    respond_to,
                } => {
                    debug!(buyer = %buyer_id, "GetCart");
                    let _ = respond_to.send(self.view(&buyer_id));
                }
                CartRequest::Clear {
                    buyer_id,
                    respond_to,
                } => {
                    let removed = self.carts.remove(&buyer_id).is_some();
                    info!(buyer = %buyer_id, removed, "Cleared cart");
                    let _ = respond_to.send(());
                }
            }
        }

        info!(carts = self.carts.len(), "Cart store shutdown");
    }

    fn upsert(
        &mut self,
        buyer_id: BuyerId,
        product_id: ProductId,
        quantity: u32,
        snapshot: ItemSnapshot,
    ) -> CartView {
        let now = Utc::now();
        let cart = self
            .carts
            .entry(buyer_id.clone())
            .or_insert_with(|| Cart {
                buyer_id: buyer_id.clone(),
                items: Vec::new(),
                updated_at: now,
            });
        if quantity == 0 {
            cart.items.retain(|item| item.product_id != product_id);
        } else {
            match cart
                .items
                .iter_mut()
                .find(|item| item.product_id == product_id)
            {
                // Absolute quantity, not an increment: repeated calls with
                // the same quantity converge.
                Some(item) => {
                    item.quantity = quantity;
                    item.unit_price_cents = snapshot.unit_price_cents;
                    item.display_name = snapshot.display_name;
                    item.image_ref = snapshot.image_ref;
                }
                None => cart.items.push(CartItem {
                    product_id,
                    quantity,
                    unit_price_cents: snapshot.unit_price_cents,
                    display_name: snapshot.display_name,
                    image_ref: snapshot.image_ref,
                }),
            }
        }
        cart.updated_at = now;
        CartView::from(&*cart)
    }

    fn view(&self, buyer_id: &BuyerId) -> CartView {
        self.carts
            .get(buyer_id)
            .map(CartView::from)
            .unwrap_or_else(|| CartView::empty(buyer_id.clone()))
    }
}
