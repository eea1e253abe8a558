//! Retry of transient failures.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use shopdesk_core::ProductQuery;
use shopdesk_integration_tests::{Backend, failure, ok, product};
use shopdesk_storefront::StorefrontState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_server_errors_are_retried() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/products"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/products"))
        .respond_with(ok(json!([product("p1", "Mango Box", 899.5)])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let state = StorefrontState::new(backend.retrying_client(2));
    state.load_products(&ProductQuery::default()).await.unwrap();
    assert_eq!(state.products().read().await.items.len(), 1);
}

#[tokio::test]
async fn test_retries_give_up_after_limit() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/products"))
        .respond_with(failure(500, "still down"))
        .expect(3)
        .mount(&backend.server)
        .await;

    let state = StorefrontState::new(backend.retrying_client(2));
    let err = state
        .load_products(&ProductQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(
        state.products().read().await.error.as_deref(),
        Some("still down")
    );
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/products"))
        .respond_with(failure(404, "Not here"))
        .expect(1)
        .mount(&backend.server)
        .await;

    let state = StorefrontState::new(backend.retrying_client(5));
    state
        .load_products(&ProductQuery::default())
        .await
        .unwrap_err();
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/products"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&backend.server)
        .await;

    backend
        .storefront()
        .load_products(&ProductQuery::default())
        .await
        .unwrap_err();
}
