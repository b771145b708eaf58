//! Client for the order actor, including the checkout orchestration.

use crate::catalog_actor::CatalogError;
use crate::clients::CatalogClient;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{
    BuyerId, CartItem, Order, OrderCreate, OrderFilter, OrderId, OrderLine, OrderStatus,
    PaymentMethod, Principal, VendorId,
};
use crate::order_actor::{
    GatewaySettlement, OrderAction, OrderActionResult, OrderError, PaymentOutcome,
};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

/// One checkout call: a buyer, their cart lines, and how the resulting
/// orders ship and settle.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub buyer_id: BuyerId,
    pub items: Vec<CartItem>,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
}

/// Client for interacting with the Order actor.
///
/// This is the orchestrator side of order placement: it resolves every
/// cart line against the catalog, partitions by vendor, and issues the
/// atomic group commit. Everything after the commit request is the order
/// actor's business.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    catalog: CatalogClient,
    /// Bound on each external step of checkout (per catalog resolution,
    /// and the commit itself).
    checkout_timeout: Duration,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        catalog: CatalogClient,
        checkout_timeout: Duration,
    ) -> Self {
        Self {
            inner,
            catalog,
            checkout_timeout,
        }
    }

    /// Places one order per distinct vendor in the cart, atomically.
    ///
    /// Prices and vendor attribution come from the catalog at this moment,
    /// never from the submitted items. On success the returned ids are in
    /// vendor-group order (first appearance in the cart). On any failure
    /// no order and no notification exists.
    ///
    /// Checkout is not idempotent: a retry after a committed-but-
    /// unacknowledged success creates a second order group. Callers also
    /// clear the cart themselves; a successful checkout does not touch it.
    #[instrument(skip(self, request), fields(buyer = %request.buyer_id))]
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<Vec<OrderId>, OrderError> {
        debug!(?request, "checkout called");
        if request.items.is_empty() {
            return Err(OrderError::InvalidRequest(
                "cannot check out an empty cart".to_string(),
            ));
        }

        // Step 1: fresh catalog resolution for every line; any failure
        // rejects the whole checkout before anything is written.
        let mut groups: Vec<(VendorId, Vec<OrderLine>)> = Vec::new();
        for item in &request.items {
            if item.quantity == 0 {
                return Err(OrderError::InvalidRequest(format!(
                    "zero-quantity line for {}",
                    item.product_id
                )));
            }
            let resolved = timeout(self.checkout_timeout, self.catalog.resolve_item(item.product_id))
                .await
                .map_err(|_| {
                    OrderError::TransientFailure("catalog resolution timed out".to_string())
                })?
                .map_err(|e| match e {
                    CatalogError::NotFound(id) => {
                        OrderError::InvalidRequest(format!("unresolvable product {id}"))
                    }
                    other => OrderError::TransientFailure(other.to_string()),
                })?;

            // Step 2: partition by owning vendor, preserving per-group
            // item order and first-appearance group order.
            let line = OrderLine {
                product_id: item.product_id,
                name: resolved.name,
                unit_price_cents: resolved.unit_price_cents,
                quantity: item.quantity,
                vendor_id: resolved.vendor_id.clone(),
            };
            match groups.iter_mut().find(|(v, _)| *v == resolved.vendor_id) {
                Some((_, lines)) => lines.push(line),
                None => groups.push((resolved.vendor_id, vec![line])),
            }
        }

        let params: Vec<OrderCreate> = groups
            .into_iter()
            .map(|(vendor_id, lines)| OrderCreate {
                buyer_id: request.buyer_id.clone(),
                vendor_id,
                lines,
                shipping_address: request.shipping_address.clone(),
                payment_method: request.payment_method,
            })
            .collect();

        // Step 3: the atomic unit. Orders and their new-order notices
        // commit together or not at all.
        info!(orders = params.len(), "committing order group");
        let ids = timeout(self.checkout_timeout, self.inner.create_group(params))
            .await
            .map_err(|_| OrderError::TransientFailure("order commit timed out".to_string()))?
            .map_err(Self::map_error)?;
        info!(orders = ids.len(), "order group committed");
        Ok(ids)
    }

    /// Move an order along the fulfillment chain as `principal`.
    #[instrument(skip(self, principal), fields(actor = %principal.account_id))]
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        principal: &Principal,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(
                id,
                OrderAction::SetStatus {
                    status,
                    principal: principal.clone(),
                },
            )
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::StatusChanged(order) => Ok(order),
            other => {
                warn!(?other, "unexpected action result");
                Err(OrderError::TransientFailure(
                    "unexpected result for status change".to_string(),
                ))
            }
        }
    }

    /// Apply a payment outcome to a gateway-paid order.
    #[instrument(skip(self, settlement))]
    pub async fn record_payment(
        &self,
        id: OrderId,
        outcome: PaymentOutcome,
        settlement: Option<GatewaySettlement>,
    ) -> Result<OrderActionResult, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(
                id,
                OrderAction::RecordPayment {
                    outcome,
                    settlement,
                },
            )
            .await
            .map_err(Self::map_error)
    }

    /// Orders matching the filter (a vendor's book, a buyer's history).
    #[instrument(skip(self))]
    pub async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let mut orders = self.inner.list(filter).await.map_err(Self::map_error)?;
        orders.sort_by_key(|order| order.id.0);
        Ok(orders)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> OrderError {
        match e {
            // Entity rejections come back boxed; recover the taxonomy.
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(err) => *err,
                Err(other) => OrderError::TransientFailure(other.to_string()),
            },
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::TransientFailure(other.to_string()),
        }
    }
}
