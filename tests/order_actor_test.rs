//! Isolation tests: real order actor with mocked dependencies, and the
//! checkout client against a raw mock channel.
//!
//! Pattern: Actor + Mocks. The order actor's group-commit and transition
//! logic run for real; the catalog and the notification sink are scripted
//! doubles.

use order_desk::clients::{CatalogClient, CheckoutRequest, NotificationClient, OrderClient};
use order_desk::framework::mock::{create_mock_client, expect_create_group, MockClient};
use order_desk::framework::{ActorClient, FrameworkError};
use order_desk::model::{
    CartItem, Notification, NotificationId, Order, OrderStatus, PaymentMethod, PaymentStatus,
    Principal, Product, ProductId,
};
use order_desk::order_actor::{OrderContext, OrderError};
use std::time::Duration;

fn product(id: u32, vendor: &str, name: &str, price_cents: u64) -> Product {
    Product {
        id: ProductId::from(id),
        vendor_id: vendor.to_string(),
        name: name.to_string(),
        price_cents,
        image_ref: None,
    }
}

fn cart_item(id: u32, quantity: u32) -> CartItem {
    CartItem {
        product_id: ProductId::from(id),
        quantity,
        unit_price_cents: 1,
        display_name: "stale".to_string(),
        image_ref: None,
    }
}

fn request(items: Vec<CartItem>, payment_method: PaymentMethod) -> CheckoutRequest {
    CheckoutRequest {
        buyer_id: "buyer_1".to_string(),
        items,
        shipping_address: "12 Harbor Street".to_string(),
        payment_method,
    }
}

/// Real order actor, mocked catalog and sink: the group commit runs
/// through the actor and the scripted sink batch.
#[tokio::test]
async fn test_order_actor_with_mocked_dependencies() {
    let mut catalog_mock = MockClient::<Product>::new();
    catalog_mock
        .expect_get(ProductId::from(1))
        .return_ok(Some(product(1, "v1", "Widget", 1000)));

    let mut sink_mock = MockClient::<Notification>::new();
    // Order::on_create_group commits the notices as one batch.
    sink_mock
        .expect_create_group()
        .return_ok(vec![NotificationId::from(1)]);

    let (order_actor, order_client) = order_desk::order_actor::new(
        8,
        CatalogClient::new(catalog_mock.client()),
        Duration::from_secs(1),
    );
    let actor_handle = tokio::spawn(order_actor.run(OrderContext {
        notifications: NotificationClient::new(sink_mock.client()),
    }));

    let ids = order_client
        .checkout(request(
            vec![cart_item(1, 3)],
            PaymentMethod::CashOnDelivery,
        ))
        .await
        .expect("Checkout failed");
    assert_eq!(ids.len(), 1);

    let order = order_client.get(ids[0]).await.unwrap().expect("Order not found");
    assert_eq!(order.buyer_id, "buyer_1");
    assert_eq!(order.vendor_id, "v1");
    assert_eq!(order.total_cents, 3000);
    assert_eq!(order.status, OrderStatus::Pending);

    catalog_mock.verify();
    sink_mock.verify();

    drop(order_client);
    actor_handle.await.unwrap();
}

/// A transition only commits if its buyer notice does: with the sink
/// failing, the order is unchanged; once the sink recovers, it moves.
#[tokio::test]
async fn test_status_change_fails_closed_without_sink() {
    let mut catalog_mock = MockClient::<Product>::new();
    catalog_mock
        .expect_get(ProductId::from(1))
        .return_ok(Some(product(1, "v1", "Widget", 1000)));

    let mut sink_mock = MockClient::<Notification>::new();
    sink_mock
        .expect_create_group()
        .return_ok(vec![NotificationId::from(1)]);
    // First status notice fails, second succeeds.
    sink_mock
        .expect_create()
        .return_err(FrameworkError::ActorClosed);
    sink_mock.expect_create().return_ok(NotificationId::from(2));

    let (order_actor, order_client) = order_desk::order_actor::new(
        8,
        CatalogClient::new(catalog_mock.client()),
        Duration::from_secs(1),
    );
    let actor_handle = tokio::spawn(order_actor.run(OrderContext {
        notifications: NotificationClient::new(sink_mock.client()),
    }));

    let ids = order_client
        .checkout(request(vec![cart_item(1, 1)], PaymentMethod::Gateway))
        .await
        .unwrap();
    let vendor = Principal::vendor("v1");

    let err = order_client
        .set_status(ids[0], OrderStatus::Processing, &vendor)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::TransientFailure(_)));
    let order = order_client.get(ids[0]).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Pending, "failed notice, no transition");

    let order = order_client
        .set_status(ids[0], OrderStatus::Processing, &vendor)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    sink_mock.verify();

    drop(order_client);
    actor_handle.await.unwrap();
}

/// Checkout client against a raw order channel: asserts the exact
/// partition and pricing of the committed group.
#[tokio::test]
async fn test_checkout_partitions_by_vendor_with_resolved_prices() {
    let mut catalog_mock = MockClient::<Product>::new();
    catalog_mock
        .expect_get(ProductId::from(1))
        .return_ok(Some(product(1, "v1", "Widget", 1000)));
    catalog_mock
        .expect_get(ProductId::from(2))
        .return_ok(Some(product(2, "v2", "Gadget", 5000)));
    catalog_mock
        .expect_get(ProductId::from(3))
        .return_ok(Some(product(3, "v1", "Sprocket", 250)));

    let (order_resource, mut order_rx) = create_mock_client::<Order>(10);
    let client = OrderClient::new(
        order_resource,
        CatalogClient::new(catalog_mock.client()),
        Duration::from_secs(1),
    );

    let checkout = tokio::spawn(async move {
        client
            .checkout(request(
                vec![cart_item(1, 2), cart_item(2, 1), cart_item(3, 4)],
                PaymentMethod::Gateway,
            ))
            .await
    });

    let (params, respond_to) = expect_create_group(&mut order_rx)
        .await
        .expect("Expected CreateGroup request");
    assert_eq!(params.len(), 2);

    assert_eq!(params[0].vendor_id, "v1");
    assert_eq!(params[0].lines.len(), 2);
    assert_eq!(params[0].lines[0].unit_price_cents, 1000);
    assert_eq!(params[0].lines[0].quantity, 2);
    assert_eq!(params[0].lines[1].unit_price_cents, 250);
    assert_eq!(params[0].lines[1].name, "Sprocket");

    assert_eq!(params[1].vendor_id, "v2");
    assert_eq!(params[1].lines.len(), 1);
    assert_eq!(params[1].lines[0].unit_price_cents, 5000);

    respond_to
        .send(Ok(vec![1.into(), 2.into()]))
        .expect("Checkout dropped its response channel");

    let ids = checkout.await.unwrap().unwrap();
    assert_eq!(ids.len(), 2);
    catalog_mock.verify();
}

/// A catalog that never answers trips the checkout timeout; the commit is
/// never issued.
#[tokio::test]
async fn test_checkout_times_out_without_catalog() {
    let (catalog_resource, _catalog_rx) = create_mock_client::<Product>(10);
    let (order_resource, mut order_rx) = create_mock_client::<Order>(10);
    let client = OrderClient::new(
        order_resource,
        CatalogClient::new(catalog_resource),
        Duration::from_millis(50),
    );

    let err = client
        .checkout(request(vec![cart_item(1, 1)], PaymentMethod::Gateway))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::TransientFailure(_)));

    // Nothing was sent to the order actor.
    assert!(order_rx.try_recv().is_err());
}
