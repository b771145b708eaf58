//! Orders, order lines, and the status vocabulary of the fulfillment
//! state machine.

use crate::model::ids::{BuyerId, OrderId, ProductId, VendorId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// How an order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Settled in person on delivery confirmation.
    CashOnDelivery,
    /// Settled out of band by the payment gateway; the reconciliation
    /// listener applies the outcome.
    Gateway,
}

/// Delivery lifecycle of an order.
///
/// The fulfillment chain runs Pending → Processing → Shipped →
/// OutForDelivery → Delivered. Forward movement may skip stages; backward
/// movement never happens. Cancelled is reachable from Pending or
/// Processing only. Delivered and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Position in the fulfillment chain; `None` for Cancelled, which sits
    /// outside it.
    fn chain_rank(self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Processing => Some(1),
            OrderStatus::Shipped => Some(2),
            OrderStatus::OutForDelivery => Some(3),
            OrderStatus::Delivered => Some(4),
            OrderStatus::Cancelled => None,
        }
    }

    /// Whether the directed edge `self -> next` is in the legal set.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        match (self, next) {
            (OrderStatus::Pending | OrderStatus::Processing, OrderStatus::Cancelled) => true,
            (_, OrderStatus::Cancelled) => false,
            (current, next) => match (current.chain_rank(), next.chain_rank()) {
                (Some(from), Some(to)) => to > from,
                // No edge leaves Cancelled.
                _ => false,
            },
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{name}")
    }
}

/// Settlement state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    /// Paid and Failed accept no further transitions (duplicate gateway
    /// deliveries are acknowledged as no-ops, not applied).
    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Failed)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// One line of an order, denormalized at creation time so later catalog
/// changes never alter a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price_cents: u64,
    pub quantity: u32,
    pub vendor_id: VendorId,
}

impl OrderLine {
    pub fn extension_cents(&self) -> u64 {
        self.unit_price_cents * u64::from(self.quantity)
    }
}

/// A single vendor's slice of one checkout.
///
/// Invariant: every line's vendor equals `vendor_id`; an order never
/// mixes vendors. Orders are never deleted; cancellation is a status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: BuyerId,
    pub vendor_id: VendorId,
    pub lines: Vec<OrderLine>,
    pub total_cents: u64,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// Gateway audit trail, recorded when a gateway settlement is applied.
    pub gateway_payment_id: Option<String>,
    pub settled_amount_cents: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Payload for creating one vendor order of a checkout group.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub buyer_id: BuyerId,
    pub vendor_id: VendorId,
    pub lines: Vec<OrderLine>,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
}

/// Predicate for order listing.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub buyer_id: Option<BuyerId>,
    pub vendor_id: Option<VendorId>,
}

impl OrderFilter {
    pub fn for_buyer(buyer_id: impl Into<BuyerId>) -> Self {
        Self {
            buyer_id: Some(buyer_id.into()),
            vendor_id: None,
        }
    }

    pub fn for_vendor(vendor_id: impl Into<VendorId>) -> Self {
        Self {
            buyer_id: None,
            vendor_id: Some(vendor_id.into()),
        }
    }
}

/// Renders cents as a decimal amount for human-facing notification copy.
pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
