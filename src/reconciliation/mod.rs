//! Payment reconciliation: mapping signed gateway callbacks onto order
//! payment state.
//!
//! The listener is intentionally dumb plumbing. Authenticity is checked
//! here, but every state rule (terminal payment statuses, duplicate
//! settlements, COD orders) lives in the order actor, where it is
//! evaluated against current state with no races.

pub mod event;

pub use event::{PaymentEvent, SignatureVerifier, EVENT_PAYMENT_FAILED, EVENT_PAYMENT_SUCCEEDED};

use crate::clients::OrderClient;
use crate::model::OrderId;
use crate::order_actor::{GatewaySettlement, OrderActionResult, OrderError, PaymentOutcome};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Successful dispositions of a gateway event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
    /// The settlement was applied to the order.
    Applied(OrderId),
    /// Redelivery of an already-applied settlement; nothing changed.
    Duplicate,
    /// An event type this core does not know; acknowledged so the gateway
    /// stops retrying, applied nowhere.
    Ignored,
}

/// Rejected dispositions of a gateway event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Reject {
    /// The signature did not verify; the payload was never parsed.
    #[error("event signature did not verify")]
    BadSignature,

    /// The payload verified but did not parse.
    #[error("malformed event payload: {0}")]
    Malformed(String),

    /// The referenced order does not exist.
    #[error("unknown order reference: {0}")]
    UnknownOrder(String),

    /// The order exists but the settlement contradicts its state (e.g. a
    /// second, different settlement for an already-settled order).
    #[error("conflicting settlement: {0}")]
    Conflict(String),

    /// The order store was unreachable; the gateway should redeliver.
    #[error("order store unavailable: {0}")]
    Unavailable(String),
}

/// External-event-driven component translating gateway callbacks into
/// payment-status updates on the orders checkout created.
#[derive(Clone)]
pub struct ReconciliationListener {
    orders: OrderClient,
    verifier: SignatureVerifier,
}

impl ReconciliationListener {
    pub fn new(orders: OrderClient, verifier: SignatureVerifier) -> Self {
        Self { orders, verifier }
    }

    /// Handle one gateway delivery: raw payload bytes plus the hex HMAC
    /// tag sent alongside them.
    ///
    /// Idempotent: redelivery of an applied settlement returns
    /// [`Ack::Duplicate`]. An unverifiable event is rejected before any
    /// parse or lookup, so it learns nothing about which orders exist.
    #[instrument(skip(self, payload, signature))]
    pub async fn on_payment_event(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<Ack, Reject> {
        if !self.verifier.verify(payload, signature) {
            warn!("rejected gateway event: bad signature");
            return Err(Reject::BadSignature);
        }

        let event: PaymentEvent =
            serde_json::from_slice(payload).map_err(|e| Reject::Malformed(e.to_string()))?;

        let outcome = match event.event_type.as_str() {
            EVENT_PAYMENT_SUCCEEDED => PaymentOutcome::Paid,
            EVENT_PAYMENT_FAILED => PaymentOutcome::Failed,
            other => {
                debug!(event_type = other, "ignoring unknown gateway event type");
                return Ok(Ack::Ignored);
            }
        };

        let order_id: OrderId = event
            .order_ref
            .parse()
            .map_err(|_| Reject::UnknownOrder(event.order_ref.clone()))?;
        let settlement = GatewaySettlement {
            payment_id: event.payment_id.clone(),
            amount_cents: event.amount_cents,
        };

        match self
            .orders
            .record_payment(order_id, outcome, Some(settlement))
            .await
        {
            Ok(OrderActionResult::PaymentApplied(order)) => {
                info!(order = %order.id, payment_id = %event.payment_id, "settlement applied");
                Ok(Ack::Applied(order.id))
            }
            Ok(OrderActionResult::PaymentAlreadyApplied) => {
                debug!(payment_id = %event.payment_id, "duplicate settlement acknowledged");
                Ok(Ack::Duplicate)
            }
            Ok(other) => Err(Reject::Unavailable(format!(
                "unexpected result applying settlement: {other:?}"
            ))),
            Err(OrderError::NotFound(reference)) => Err(Reject::UnknownOrder(reference)),
            Err(OrderError::InvalidRequest(reason)) => Err(Reject::Conflict(reason)),
            Err(e) => Err(Reject::Unavailable(e.to_string())),
        }
    }
}
