//! Storefront catalog listings through the slice lifecycle.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use shopdesk_core::{FALLBACK_ERROR, ProductId, ProductQuery};
use shopdesk_integration_tests::{Backend, failure, listing, ok, product};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_listing_fills_slice() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/products"))
        .respond_with(listing(
            json!([product("p1", "Mango Box", 899.5), product("p2", "Fig Jam", 120.0)]),
            42,
        ))
        .expect(1)
        .mount(&backend.server)
        .await;

    let state = backend.storefront();
    state.load_products(&ProductQuery::default()).await.unwrap();

    let products = state.products().read().await;
    assert!(!products.loading);
    assert_eq!(products.error, None);
    assert_eq!(products.items.len(), 2);
    assert_eq!(products.count, Some(42));
}

#[tokio::test]
async fn test_query_is_sent_as_parameters() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/products"))
        .and(query_param("search", "mango"))
        .and(query_param("page", "2"))
        .respond_with(listing(json!([]), 0))
        .expect(1)
        .mount(&backend.server)
        .await;

    let state = backend.storefront();
    let query = ProductQuery {
        search: Some("mango".to_owned()),
        page: Some(2),
        ..ProductQuery::default()
    };
    state.load_products(&query).await.unwrap();
    assert!(state.products().read().await.items.is_empty());
}

#[tokio::test]
async fn test_failure_keeps_previous_items() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/categories"))
        .respond_with(ok(json!([{"_id": "c1", "name": "Fruit"}])))
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/categories"))
        .respond_with(failure(500, "Database unavailable"))
        .mount(&backend.server)
        .await;

    let state = backend.storefront();
    state.load_categories().await.unwrap();
    let err = state.load_categories().await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    let categories = state.categories().read().await;
    assert!(!categories.loading);
    assert_eq!(categories.error.as_deref(), Some("Database unavailable"));
    assert_eq!(categories.items.len(), 1);
}

#[tokio::test]
async fn test_failure_without_message_uses_fallback() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/banners"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&backend.server)
        .await;

    let state = backend.storefront();
    state.load_banners().await.unwrap_err();
    assert_eq!(
        state.banners().read().await.error.as_deref(),
        Some(FALLBACK_ERROR)
    );
}

#[tokio::test]
async fn test_rejected_envelope_is_a_failure() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/products/p9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Product not found"})),
        )
        .mount(&backend.server)
        .await;

    let state = backend.storefront();
    state.open_product(&ProductId::new("p9")).await.unwrap_err();

    let products = state.products().read().await;
    assert_eq!(products.current, None);
    assert_eq!(products.error.as_deref(), Some("Product not found"));
}

#[tokio::test]
async fn test_text_filter_over_loaded_products() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/user/products"))
        .respond_with(ok(json!([
            product("p1", "Mango Box", 899.5),
            product("p2", "Mango Pickle", 150.0),
            product("p3", "Fig Jam", 120.0),
        ])))
        .mount(&backend.server)
        .await;

    let state = backend.storefront();
    state.load_products(&ProductQuery::default()).await.unwrap();
    let names: Vec<String> = state
        .filter_products("MANGO")
        .await
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Mango Box", "Mango Pickle"]);
}
