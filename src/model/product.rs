//! Catalog entries.
//!
//! The catalog is consulted, never owned, by the order side: checkout
//! resolves every cart line against it to get the authoritative price and
//! vendor attribution at order time.

use crate::model::ids::{ProductId, VendorId};
use serde::{Deserialize, Serialize};

/// A vendor-owned catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub vendor_id: VendorId,
    pub name: String,
    pub price_cents: u64,
    pub image_ref: Option<String>,
}

/// Payload for creating a catalog product (admin/vendor glue only).
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub vendor_id: VendorId,
    pub name: String,
    pub price_cents: u64,
    pub image_ref: Option<String>,
}

/// Payload for updating a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price_cents: Option<u64>,
}

/// What the catalog reports for one product at resolution time.
///
/// This is the only product data checkout trusts; buyer-submitted prices
/// and vendor attributions are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    pub product_id: ProductId,
    pub vendor_id: VendorId,
    pub name: String,
    pub unit_price_cents: u64,
    pub image_ref: Option<String>,
}
