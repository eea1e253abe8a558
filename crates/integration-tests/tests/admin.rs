//! Admin mutations, labels, and multipart uploads.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use shopdesk_api::FilePart;
use shopdesk_core::{
    AccountStatus, CategoryId, OrderId, OrderStatus, ProductDraft, ProductId, UserId, VariantDraft, VariantId,
};
use shopdesk_integration_tests::{Backend, ack, listing, ok, order, product, sign_in_both, user};
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_delete_removes_by_id_whatever_the_body() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/orders"))
        .respond_with(listing(
            json!([order("o1", "pending", 10.0), order("o2", "shipped", 20.0)]),
            2,
        ))
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/orders/o1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend.server)
        .await;

    let state = backend.admin();
    state.load_orders().await.unwrap();
    state.delete_order(&OrderId::new("o1")).await.unwrap();

    let orders = state.orders().read().await;
    let ids: Vec<&str> = orders.items.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["o2"]);
}

#[tokio::test]
async fn test_delete_accepts_body_without_success_field() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/categories"))
        .respond_with(listing(
            json!([{"_id": "c1", "name": "Fruit"}, {"_id": "c2", "name": "Dairy"}]),
            2,
        ))
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/categories/c1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Category deleted" })),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let state = backend.admin();
    state.load_categories().await.unwrap();
    state.delete_category(&CategoryId::new("c1")).await.unwrap();

    let categories = state.categories().read().await;
    let ids: Vec<&str> = categories.items.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c2"]);
    assert!(categories.error.is_none());
}

#[tokio::test]
async fn test_delete_declined_explicitly_keeps_record() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/categories"))
        .respond_with(listing(json!([{"_id": "c1", "name": "Fruit"}]), 1))
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/categories/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "success": false, "message": "Category has products" }),
        ))
        .mount(&backend.server)
        .await;

    let state = backend.admin();
    state.load_categories().await.unwrap();
    assert!(state.delete_category(&CategoryId::new("c1")).await.is_err());

    let categories = state.categories().read().await;
    assert_eq!(categories.items.len(), 1);
    assert_eq!(categories.error.as_deref(), Some("Category has products"));
}

#[tokio::test]
async fn test_status_update_splices_by_id() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/orders"))
        .respond_with(ok(json!([order("o1", "pending", 10.0), order("o2", "pending", 20.0)])))
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/orders/o2/status"))
        .and(body_json(json!({"status": "shipped"})))
        .respond_with(ok(order("o2", "shipped", 20.0)))
        .expect(1)
        .mount(&backend.server)
        .await;

    let state = backend.admin();
    state.load_orders().await.unwrap();
    state
        .update_order_status(&OrderId::new("o2"), OrderStatus::Shipped)
        .await
        .unwrap();

    let shipped = state.orders_with_status(OrderStatus::Shipped).await;
    assert_eq!(shipped.len(), 1);
    assert_eq!(state.orders().read().await.items.len(), 2);
}

#[tokio::test]
async fn test_update_for_unknown_id_changes_nothing() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ok(json!([user("u1", "Asha"), user("u2", "Ravi")])))
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/users/u1/status"))
        .respond_with(ok(json!({
            "_id": "u9",
            "name": "Ghost",
            "email": "ghost@example.com",
            "status": "blocked",
        })))
        .mount(&backend.server)
        .await;

    let state = backend.admin();
    state.load_users().await.unwrap();
    let before = state.users().read().await.items.clone();

    state
        .update_user_status(&UserId::new("u1"), AccountStatus::Blocked)
        .await
        .unwrap();

    let users = state.users().read().await;
    assert_eq!(users.items, before);
    assert!(!users.loading);
    assert_eq!(users.error, None);
}

#[tokio::test]
async fn test_product_images_go_as_multipart() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/products"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"images\""))
        .and(body_string_contains("Mango Box"))
        .respond_with(ok(product("p1", "Mango Box", 899.5)))
        .expect(1)
        .mount(&backend.server)
        .await;

    let client = backend.client();
    sign_in_both(&client);
    let state = shopdesk_admin::AdminState::new(client);
    let draft = ProductDraft {
        name: "Mango Box".to_owned(),
        price: rust_decimal::Decimal::new(8995, 1),
        ..ProductDraft::default()
    };
    let image = FilePart::new("images", "box.png", "image/png", b"not really a png".to_vec());
    state.create_product(draft, vec![image]).await.unwrap();

    assert_eq!(state.products().read().await.items.len(), 1);
}

#[tokio::test]
async fn test_product_without_images_goes_as_json() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/products"))
        .and(header_regex("content-type", "^application/json"))
        .respond_with(ok(product("p1", "Fig Jam", 120.0)))
        .expect(1)
        .mount(&backend.server)
        .await;

    let state = backend.admin();
    let draft = ProductDraft {
        name: "Fig Jam".to_owned(),
        price: rust_decimal::Decimal::from(120),
        ..ProductDraft::default()
    };
    state.create_product(draft, Vec::new()).await.unwrap();
}

#[tokio::test]
async fn test_variant_update_replaces_product() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(ok(json!([product("p1", "Mango Box", 899.5)])))
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/products/p1/variants/v1"))
        .and(body_json(json!({"stock": 7})))
        .respond_with(ok(json!({
            "_id": "p1",
            "name": "Mango Box",
            "price": 899.5,
            "variants": [{"_id": "v1", "name": "1kg", "price": 899.5, "stock": 7}],
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let state = backend.admin();
    state
        .load_products(&shopdesk_core::ProductQuery::default())
        .await
        .unwrap();
    let draft = VariantDraft {
        stock: Some(7),
        ..VariantDraft::default()
    };
    state
        .update_variant(&ProductId::new("p1"), &VariantId::new("v1"), draft)
        .await
        .unwrap();

    let products = state.products().read().await;
    let variant = products
        .items
        .first()
        .unwrap()
        .variant(&VariantId::new("v1"))
        .unwrap();
    assert_eq!(variant.stock, Some(7));

    drop(products);
    assert!(state.toggle_variant(VariantId::new("v1")).await);
    assert!(!state.toggle_variant(VariantId::new("v1")).await);
}

#[tokio::test]
async fn test_label_download_is_written_and_remembered() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/orders/o1/label"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.4 label".to_vec()),
        )
        .expect(2)
        .mount(&backend.server)
        .await;

    let state = backend.admin();
    let id = OrderId::new("o1");
    assert!(!state.is_label_downloaded(&id));

    let written = state.download_label(&id, &backend.scratch()).await.unwrap();
    assert_eq!(std::fs::read(&written).unwrap(), b"%PDF-1.4 label");
    assert!(state.is_label_downloaded(&id));

    state.download_label(&id, &backend.scratch()).await.unwrap();
    assert_eq!(state.downloaded_labels(), vec![id]);
    assert!(backend.admin().is_label_downloaded(&OrderId::new("o1")));
}

#[tokio::test]
async fn test_contact_delete_acknowledged() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/contacts"))
        .respond_with(ok(json!([
            {"_id": "m1", "name": "Asha", "email": "asha@example.com", "message": "Hi"},
        ])))
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/contacts/m1"))
        .respond_with(ack("Deleted"))
        .mount(&backend.server)
        .await;

    let state = backend.admin();
    state.load_contacts().await.unwrap();
    state
        .delete_contact(&shopdesk_core::ContactId::new("m1"))
        .await
        .unwrap();
    assert!(state.contacts().read().await.items.is_empty());
}
