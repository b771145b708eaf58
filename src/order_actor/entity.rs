//! ActorEntity implementation for [`Order`]: group creation with the
//! write-ahead notification batch, and the fulfillment state machine.
//!
//! All mutations of an order flow through this actor, so every rule here
//! is evaluated against current state with no interleaving. A vendor's
//! status change and a gateway payment event racing on the same order are
//! ordered by the actor's channel, never merged.

use crate::framework::ActorEntity;
use crate::model::{
    format_cents, NotificationCreate, NotificationKind, Order, OrderCreate, OrderFilter, OrderId,
    OrderStatus, PaymentMethod, PaymentStatus, Principal, Recipient, Role,
};
use crate::order_actor::{
    GatewaySettlement, OrderAction, OrderActionResult, OrderContext, OrderError, PaymentOutcome,
};
use async_trait::async_trait;
use chrono::Utc;

/// The vendor-facing notice announcing one order of a checkout group.
fn new_order_notice(order: &Order) -> NotificationCreate {
    NotificationCreate {
        kind: NotificationKind::NewOrder,
        title: format!("New order {}", order.id),
        body: format!(
            "{} line(s), {} total, ship to: {}",
            order.lines.len(),
            format_cents(order.total_cents),
            order.shipping_address
        ),
        recipient: Recipient::vendor(order.vendor_id.clone()),
        related_id: Some(order.id.to_string()),
    }
}

/// The buyer-facing notice announcing a status change.
fn status_change_notice(order: &Order, status: OrderStatus) -> NotificationCreate {
    NotificationCreate {
        kind: NotificationKind::OrderStatusChange,
        title: format!("Order {} is now {}", order.id, status),
        body: format!("Your order from vendor {} is now {}.", order.vendor_id, status),
        recipient: Recipient::buyer(order.buyer_id.clone()),
        related_id: Some(order.id.to_string()),
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Filter = OrderFilter;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.lines.is_empty() {
            return Err(OrderError::InvalidRequest(
                "an order must carry at least one line".to_string(),
            ));
        }
        for line in &params.lines {
            if line.quantity == 0 {
                return Err(OrderError::InvalidRequest(format!(
                    "zero-quantity line for {}",
                    line.product_id
                )));
            }
            // Vendor isolation: no order ever mixes vendors.
            if line.vendor_id != params.vendor_id {
                return Err(OrderError::InvalidRequest(format!(
                    "line for {} belongs to vendor {}, order belongs to {}",
                    line.product_id, line.vendor_id, params.vendor_id
                )));
            }
        }
        let total_cents = params.lines.iter().map(|l| l.extension_cents()).sum();
        let now = Utc::now();
        Ok(Self {
            id,
            buyer_id: params.buyer_id,
            vendor_id: params.vendor_id,
            lines: params.lines,
            total_cents,
            shipping_address: params.shipping_address,
            payment_method: params.payment_method,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            gateway_payment_id: None,
            settled_amount_cents: None,
            created_at: now,
            updated_at: now,
            paid_at: None,
        })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter
            .buyer_id
            .as_ref()
            .map_or(true, |buyer| *buyer == self.buyer_id)
            && filter
                .vendor_id
                .as_ref()
                .map_or(true, |vendor| *vendor == self.vendor_id)
    }

    /// Writes the companion new-order notices before the group commit.
    ///
    /// The batch is all-or-nothing inside the notification actor, and the
    /// order inserts that follow a successful hook cannot fail, so either
    /// every order of the checkout and every notice exists, or nothing
    /// does.
    async fn on_create_group(
        items: &mut [Self],
        ctx: &OrderContext,
    ) -> Result<(), OrderError> {
        let notices: Vec<NotificationCreate> = items.iter().map(new_order_notice).collect();
        ctx.notifications
            .create_batch(notices)
            .await
            .map_err(|e| OrderError::TransientFailure(e.to_string()))?;
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), OrderError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::SetStatus { status, principal } => {
                self.set_status(status, &principal, ctx).await
            }
            OrderAction::RecordPayment {
                outcome,
                settlement,
            } => self.record_payment(outcome, settlement),
        }
    }
}

impl Order {
    async fn set_status(
        &mut self,
        status: OrderStatus,
        principal: &Principal,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        let authorized = match principal.role {
            Role::Admin => true,
            Role::Vendor => principal.account_id == self.vendor_id,
            Role::Buyer => false,
        };
        if !authorized {
            return Err(OrderError::Unauthorized(format!(
                "{} may not change {}",
                principal.account_id, self.id
            )));
        }
        if !self.status.can_transition_to(status) {
            return Err(OrderError::InvalidRequest(format!(
                "illegal transition {} -> {} for {}",
                self.status, status, self.id
            )));
        }

        // The buyer notice must be durable before the transition reports
        // success; nothing below this await can fail, so a sink failure
        // leaves the order untouched.
        ctx.notifications
            .create(status_change_notice(self, status))
            .await
            .map_err(|e| OrderError::TransientFailure(e.to_string()))?;

        let now = Utc::now();
        self.status = status;
        self.updated_at = now;
        // COD settles on delivery confirmation, in the same mutation: a
        // reader never sees a delivered COD order that is still unpaid.
        if status == OrderStatus::Delivered
            && self.payment_method == PaymentMethod::CashOnDelivery
            && self.payment_status != PaymentStatus::Paid
        {
            self.payment_status = PaymentStatus::Paid;
            self.paid_at = Some(now);
        }
        Ok(OrderActionResult::StatusChanged(self.clone()))
    }

    fn record_payment(
        &mut self,
        outcome: PaymentOutcome,
        settlement: Option<GatewaySettlement>,
    ) -> Result<OrderActionResult, OrderError> {
        // Duplicate delivery of an applied settlement is success, not an
        // error: the gateway's retry policy stays simple.
        if self.payment_status.is_terminal() {
            let already_applied = match (&self.gateway_payment_id, &settlement) {
                (Some(applied), Some(incoming)) => *applied == incoming.payment_id,
                _ => false,
            };
            if already_applied {
                return Ok(OrderActionResult::PaymentAlreadyApplied);
            }
            return Err(OrderError::InvalidRequest(format!(
                "payment for {} is already {}",
                self.id, self.payment_status
            )));
        }
        if self.payment_method == PaymentMethod::CashOnDelivery {
            return Err(OrderError::InvalidRequest(format!(
                "{} is cash-on-delivery and settles on delivery",
                self.id
            )));
        }

        let now = Utc::now();
        match outcome {
            PaymentOutcome::Paid => {
                self.payment_status = PaymentStatus::Paid;
                self.paid_at = Some(now);
            }
            PaymentOutcome::Failed => {
                self.payment_status = PaymentStatus::Failed;
            }
        }
        self.updated_at = now;
        if let Some(settlement) = settlement {
            self.gateway_payment_id = Some(settlement.payment_id);
            self.settled_amount_cents = Some(settlement.amount_cents);
        }
        Ok(OrderActionResult::PaymentApplied(self.clone()))
    }
}
