//! Cart selection, checkout, and order flows.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use serde_json::json;
use shopdesk_api::ApiError;
use shopdesk_core::{AddressId, CartItemId, OrderId, OrderStatus};
use shopdesk_integration_tests::{Backend, ack, cart_line, ok, order, sign_in_both};
use wiremock::Mock;
use wiremock::matchers::{body_json, method, path};

#[tokio::test]
async fn test_checkout_orders_selected_lines_then_refetches_cart() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/cart"))
        .respond_with(ok(json!([
            cart_line("ci1", "p1", 2, 100.0),
            cart_line("ci2", "p2", 1, 49.5),
            cart_line("ci3", "p3", 3, 10.0),
        ])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/orders"))
        .and(body_json(json!({
            "cartItemIds": ["ci1", "ci3"],
            "addressId": "addr1",
            "paymentMethod": "cod",
        })))
        .respond_with(ok(order("o1", "pending", 230.0)))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/cart"))
        .respond_with(ok(json!([cart_line("ci2", "p2", 1, 49.5)])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let client = backend.client();
    sign_in_both(&client);
    let state = shopdesk_storefront::StorefrontState::new(client);

    state.load_cart().await.unwrap();
    state.select_cart_item(CartItemId::new("ci1")).await;
    state.select_cart_item(CartItemId::new("ci3")).await;
    assert_eq!(state.cart().read().await.selected_subtotal(), Decimal::from(230));

    let placed = state
        .checkout(AddressId::new("addr1"), "cod")
        .await
        .unwrap();
    assert_eq!(placed.id, OrderId::new("o1"));

    let cart = state.cart().read().await;
    assert_eq!(cart.items.len(), 1);
    assert!(cart.selected.is_empty());
    assert_eq!(state.orders().read().await.items.len(), 1);
}

#[tokio::test]
async fn test_checkout_with_empty_selection_sends_nothing() {
    let backend = Backend::start().await;
    let state = backend.storefront();

    let err = state
        .checkout(AddressId::new("addr1"), "cod")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(state.orders().read().await.error.is_some());
    assert!(backend.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cancel_refuses_shipped_order() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/orders"))
        .respond_with(ok(json!([order("o1", "shipped", 10.0), order("o2", "pending", 20.0)])))
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/user/orders/o2/cancel"))
        .respond_with(ok(order("o2", "cancelled", 20.0)))
        .expect(1)
        .mount(&backend.server)
        .await;

    let state = backend.storefront();
    state.load_orders().await.unwrap();

    let err = state.cancel_order(&OrderId::new("o1")).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    state.cancel_order(&OrderId::new("o2")).await.unwrap();
    assert_eq!(
        state.orders_with_status(OrderStatus::Cancelled).await.len(),
        1
    );
}

#[tokio::test]
async fn test_remove_line_filters_by_id() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/cart"))
        .respond_with(ok(json!([
            cart_line("ci1", "p1", 1, 5.0),
            cart_line("ci2", "p2", 1, 5.0),
        ])))
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/user/cart/ci1"))
        .respond_with(ack("Removed"))
        .expect(1)
        .mount(&backend.server)
        .await;

    let state = backend.storefront();
    state.load_cart().await.unwrap();
    state.remove_cart_item(&CartItemId::new("ci1")).await.unwrap();

    let cart = state.cart().read().await;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items.first().unwrap().id, CartItemId::new("ci2"));
}
