//! Carts and cart lines.

use crate::model::ids::{BuyerId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of a cart: a product selection plus the price/name/image
/// snapshot taken when the line was added. The snapshot is display-only;
/// checkout re-resolves everything against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price_cents: u64,
    pub display_name: String,
    pub image_ref: Option<String>,
}

impl CartItem {
    /// Line extension at the snapshot price.
    pub fn extension_cents(&self) -> u64 {
        self.unit_price_cents * u64::from(self.quantity)
    }
}

/// Display snapshot supplied by the caller when a line is added.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSnapshot {
    pub unit_price_cents: u64,
    pub display_name: String,
    pub image_ref: Option<String>,
}

/// A buyer's cart: lines unique by product, insertion order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub buyer_id: BuyerId,
    pub items: Vec<CartItem>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn total_cents(&self) -> u64 {
        self.items.iter().map(CartItem::extension_cents).sum()
    }
}

/// Read model returned by the cart store: the lines plus the derived
/// total. An empty view is a valid state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub buyer_id: BuyerId,
    pub items: Vec<CartItem>,
    pub total_cents: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            buyer_id: cart.buyer_id.clone(),
            items: cart.items.clone(),
            total_cents: cart.total_cents(),
        }
    }
}

impl CartView {
    /// The representation of a buyer who has never added anything.
    pub fn empty(buyer_id: BuyerId) -> Self {
        Self {
            buyer_id,
            items: Vec::new(),
            total_cents: 0,
        }
    }
}
