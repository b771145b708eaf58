//! The payment reconciliation listener: signature gating, idempotence,
//! and forward compatibility with unknown event types.

use order_desk::clients::CheckoutRequest;
use order_desk::framework::ActorClient;
use order_desk::model::{
    CartItem, OrderId, PaymentMethod, PaymentStatus, ProductCreate,
};
use order_desk::reconciliation::{
    Ack, PaymentEvent, Reject, SignatureVerifier, EVENT_PAYMENT_FAILED, EVENT_PAYMENT_SUCCEEDED,
};
use order_desk::runtime::{OrderSystem, SystemConfig};

const SECRET: &[u8] = b"reconciliation-test-secret";

fn test_system() -> OrderSystem {
    OrderSystem::with_config(SystemConfig {
        gateway_secret: String::from_utf8(SECRET.to_vec()).unwrap(),
        ..SystemConfig::default()
    })
}

async fn place_order(system: &OrderSystem, payment_method: PaymentMethod) -> OrderId {
    let product = system
        .catalog_client
        .create_product(ProductCreate {
            vendor_id: "v1".to_string(),
            name: "Widget".to_string(),
            price_cents: 1000,
            image_ref: None,
        })
        .await
        .unwrap();
    system
        .order_client
        .checkout(CheckoutRequest {
            buyer_id: "buyer_1".to_string(),
            items: vec![CartItem {
                product_id: product,
                quantity: 2,
                unit_price_cents: 1000,
                display_name: "Widget".to_string(),
                image_ref: None,
            }],
            shipping_address: "12 Harbor Street".to_string(),
            payment_method,
        })
        .await
        .unwrap()[0]
}

fn signed_event(event: &PaymentEvent) -> (Vec<u8>, String) {
    let payload = serde_json::to_vec(event).unwrap();
    let signature = SignatureVerifier::new(SECRET).sign(&payload);
    (payload, signature)
}

fn succeeded(order_id: OrderId, payment_id: &str, amount_cents: u64) -> PaymentEvent {
    PaymentEvent {
        event_type: EVENT_PAYMENT_SUCCEEDED.to_string(),
        payment_id: payment_id.to_string(),
        order_ref: order_id.to_string(),
        amount_cents,
    }
}

/// A verified success event settles the order and records the audit
/// trail.
#[tokio::test]
async fn test_verified_success_event_applies() {
    let system = test_system();
    let order_id = place_order(&system, PaymentMethod::Gateway).await;

    let (payload, signature) = signed_event(&succeeded(order_id, "pay_123", 2000));
    let ack = system
        .payment_listener
        .on_payment_event(&payload, &signature)
        .await
        .unwrap();
    assert_eq!(ack, Ack::Applied(order_id));

    let order = system.order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Paid);
    assert!(order.paid_at.is_some());
    assert_eq!(order.gateway_payment_id.as_deref(), Some("pay_123"));
    assert_eq!(order.settled_amount_cents, Some(2000));

    system.shutdown().await.unwrap();
}

/// Redelivering the same event is acknowledged as a duplicate and applies
/// nothing a second time.
#[tokio::test]
async fn test_duplicate_delivery_is_acknowledged_once() {
    let system = test_system();
    let order_id = place_order(&system, PaymentMethod::Gateway).await;

    let (payload, signature) = signed_event(&succeeded(order_id, "pay_123", 2000));
    let first = system
        .payment_listener
        .on_payment_event(&payload, &signature)
        .await
        .unwrap();
    assert_eq!(first, Ack::Applied(order_id));
    let paid_at = system
        .order_client
        .get(order_id)
        .await
        .unwrap()
        .unwrap()
        .paid_at;

    let second = system
        .payment_listener
        .on_payment_event(&payload, &signature)
        .await
        .unwrap();
    assert_eq!(second, Ack::Duplicate);

    let order = system.order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Paid);
    assert_eq!(order.paid_at, paid_at, "a duplicate must not restamp paid_at");

    system.shutdown().await.unwrap();
}

/// A second, different settlement for a settled order is a conflict.
#[tokio::test]
async fn test_conflicting_settlement_is_rejected() {
    let system = test_system();
    let order_id = place_order(&system, PaymentMethod::Gateway).await;

    let (payload, signature) = signed_event(&succeeded(order_id, "pay_123", 2000));
    system
        .payment_listener
        .on_payment_event(&payload, &signature)
        .await
        .unwrap();

    let (payload, signature) = signed_event(&succeeded(order_id, "pay_456", 2000));
    let err = system
        .payment_listener
        .on_payment_event(&payload, &signature)
        .await
        .unwrap_err();
    assert!(matches!(err, Reject::Conflict(_)));

    let order = system.order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.gateway_payment_id.as_deref(), Some("pay_123"));

    system.shutdown().await.unwrap();
}

/// An unverifiable event is rejected before any parse or lookup and has
/// no side effects.
#[tokio::test]
async fn test_bad_signature_is_rejected_without_effect() {
    let system = test_system();
    let order_id = place_order(&system, PaymentMethod::Gateway).await;

    let payload = serde_json::to_vec(&succeeded(order_id, "pay_123", 2000)).unwrap();
    let forged = SignatureVerifier::new(b"wrong-secret").sign(&payload);
    let err = system
        .payment_listener
        .on_payment_event(&payload, &forged)
        .await
        .unwrap_err();
    assert_eq!(err, Reject::BadSignature);

    let order = system.order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_malformed_payload_is_rejected() {
    let system = test_system();

    let payload = b"not json at all".to_vec();
    let signature = SignatureVerifier::new(SECRET).sign(&payload);
    let err = system
        .payment_listener
        .on_payment_event(&payload, &signature)
        .await
        .unwrap_err();
    assert!(matches!(err, Reject::Malformed(_)));

    system.shutdown().await.unwrap();
}

/// Unknown event types are acknowledged and ignored so the gateway can
/// evolve without breaking this core.
#[tokio::test]
async fn test_unknown_event_type_is_acknowledged() {
    let system = test_system();
    let order_id = place_order(&system, PaymentMethod::Gateway).await;

    let event = PaymentEvent {
        event_type: "payment.refund.created".to_string(),
        payment_id: "pay_123".to_string(),
        order_ref: order_id.to_string(),
        amount_cents: 2000,
    };
    let (payload, signature) = signed_event(&event);
    let ack = system
        .payment_listener
        .on_payment_event(&payload, &signature)
        .await
        .unwrap();
    assert_eq!(ack, Ack::Ignored);

    let order = system.order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_order_reference_is_rejected() {
    let system = test_system();

    for order_ref in ["order_999", "garbage-ref"] {
        let event = PaymentEvent {
            event_type: EVENT_PAYMENT_SUCCEEDED.to_string(),
            payment_id: "pay_123".to_string(),
            order_ref: order_ref.to_string(),
            amount_cents: 2000,
        };
        let (payload, signature) = signed_event(&event);
        let err = system
            .payment_listener
            .on_payment_event(&payload, &signature)
            .await
            .unwrap_err();
        assert!(matches!(err, Reject::UnknownOrder(_)), "{order_ref}");
    }

    system.shutdown().await.unwrap();
}

/// A failure event marks the payment failed, terminally.
#[tokio::test]
async fn test_failure_event_marks_payment_failed() {
    let system = test_system();
    let order_id = place_order(&system, PaymentMethod::Gateway).await;

    let event = PaymentEvent {
        event_type: EVENT_PAYMENT_FAILED.to_string(),
        payment_id: "pay_123".to_string(),
        order_ref: order_id.to_string(),
        amount_cents: 2000,
    };
    let (payload, signature) = signed_event(&event);
    let ack = system
        .payment_listener
        .on_payment_event(&payload, &signature)
        .await
        .unwrap();
    assert_eq!(ack, Ack::Applied(order_id));

    let order = system.order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Failed);
    assert!(order.paid_at.is_none());

    // Failed is terminal for a different settlement...
    let (payload, signature) = signed_event(&succeeded(order_id, "pay_456", 2000));
    let err = system
        .payment_listener
        .on_payment_event(&payload, &signature)
        .await
        .unwrap_err();
    assert!(matches!(err, Reject::Conflict(_)));

    // ...but redelivery of the same failure is still just a duplicate.
    let (payload, signature) = signed_event(&event);
    let ack = system
        .payment_listener
        .on_payment_event(&payload, &signature)
        .await
        .unwrap();
    assert_eq!(ack, Ack::Duplicate);

    system.shutdown().await.unwrap();
}

/// Gateway settlements never apply to cash-on-delivery orders.
#[tokio::test]
async fn test_cod_orders_reject_gateway_settlement() {
    let system = test_system();
    let order_id = place_order(&system, PaymentMethod::CashOnDelivery).await;

    let (payload, signature) = signed_event(&succeeded(order_id, "pay_123", 2000));
    let err = system
        .payment_listener
        .on_payment_event(&payload, &signature)
        .await
        .unwrap_err();
    assert!(matches!(err, Reject::Conflict(_)));

    let order = system.order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    system.shutdown().await.unwrap();
}
