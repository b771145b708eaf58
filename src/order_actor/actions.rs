//! Custom actions for the order actor: the two mutation entry points of
//! the fulfillment state machine.

use crate::model::{Order, OrderStatus, Principal};
use serde::{Deserialize, Serialize};

/// Gateway audit data accompanying a payment outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettlement {
    /// The gateway-assigned payment identifier; the idempotency key for
    /// duplicate event delivery.
    pub payment_id: String,
    pub amount_cents: u64,
}

/// The direction a payment resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Paid,
    Failed,
}

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Move the order along the fulfillment chain. Only the owning vendor
    /// or an administrator may do this; the COD delivered-implies-paid
    /// rule is applied inside the same mutation.
    SetStatus {
        status: OrderStatus,
        principal: Principal,
    },
    /// Apply a payment outcome (gateway-paid orders only; COD settles on
    /// delivery). Re-applying the same gateway payment id is a no-op.
    RecordPayment {
        outcome: PaymentOutcome,
        settlement: Option<GatewaySettlement>,
    },
}

/// Results from OrderActions.
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    /// The transition applied; the updated order snapshot.
    StatusChanged(Order),
    /// The payment outcome applied; the updated order snapshot.
    PaymentApplied(Order),
    /// Duplicate delivery of an already-applied settlement; nothing
    /// changed.
    PaymentAlreadyApplied,
}
