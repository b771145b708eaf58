//! The main runtime orchestrator for the order placement and fulfillment
//! system.

use crate::cart_actor::CartStore;
use crate::clients::{CartClient, CatalogClient, NotificationClient, OrderClient};
use crate::order_actor::OrderContext;
use crate::reconciliation::{ReconciliationListener, SignatureVerifier};
use crate::runtime::SystemConfig;
use tracing::{error, info};

/// The assembled order system: all actors running, all dependencies
/// wired.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle management**: starting and stopping all actors
/// - **Dependency wiring**: the order actor gets the notification client
///   (notices are written inside its commits), the order client gets the
///   catalog client (checkout-time resolution)
/// - **Configuration**: one [`SystemConfig`] drives capacities, timeouts,
///   and the gateway secret
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new();
///
/// let product = system.catalog_client.create_product(product_data).await?;
/// system.cart_client.upsert_item(buyer, product, 2, snapshot).await?;
/// let orders = system.order_client.checkout(request).await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    /// Client for the buyer-keyed cart store.
    pub cart_client: CartClient,

    /// Client for the catalog actor (the Catalog Reader stand-in).
    pub catalog_client: CatalogClient,

    /// Client for the order actor; also the checkout orchestrator.
    pub order_client: OrderClient,

    /// Client for the notification sink.
    pub notification_client: NotificationClient,

    /// Listener translating signed gateway callbacks into payment updates.
    pub payment_listener: ReconciliationListener,

    /// Task handles for all running actors (used for graceful shutdown).
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Creates a system with default configuration.
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    /// Creates and initializes a new `OrderSystem` with all actors
    /// running.
    pub fn with_config(config: SystemConfig) -> Self {
        // 1. Create actors. Catalog, carts and notifications have no
        // dependencies; the order actor and client are wired below.
        let (catalog_actor, catalog_client) = crate::catalog_actor::new(config.channel_capacity);
        let (notification_actor, notification_client) =
            crate::notification_actor::new(config.channel_capacity);
        let (cart_store, cart_client) = CartStore::new(config.channel_capacity);
        let (order_actor, order_client) = crate::order_actor::new(
            config.channel_capacity,
            catalog_client.clone(),
            config.checkout_timeout,
        );

        let payment_listener = ReconciliationListener::new(
            order_client.clone(),
            SignatureVerifier::new(config.gateway_secret.as_bytes()),
        );

        // 2. Start actors with injected context. The order actor carries
        // the notification client so notices commit with the mutations
        // that cause them.
        let handles = vec![
            tokio::spawn(catalog_actor.run(())),
            tokio::spawn(notification_actor.run(())),
            tokio::spawn(cart_store.run()),
            tokio::spawn(order_actor.run(OrderContext {
                notifications: notification_client.clone(),
            })),
        ];

        info!("Order system started");
        Self {
            cart_client,
            catalog_client,
            order_client,
            notification_client,
            payment_listener,
            handles,
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes their channels; each actor drains its
    /// queue and exits. The order actor's context holds the last
    /// notification sender, so the notification actor exits right after
    /// it.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.cart_client);
        drop(self.catalog_client);
        drop(self.payment_listener);
        drop(self.order_client);
        drop(self.notification_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for OrderSystem {
    fn default() -> Self {
        Self::new()
    }
}
