//! Categories, products, and variants.
//!
//! Product and category forms may carry image files; with files attached
//! the body goes out as multipart, otherwise as JSON.

use serde_json::Value;
use shopdesk_api::endpoints::admin;
use shopdesk_api::{ApiClient, FilePart, Payload, Result};
use shopdesk_core::{
    Category, CategoryDraft, CategoryId, Listing, Product, ProductDraft, ProductId, ProductQuery,
    VariantDraft, VariantId,
};
use tracing::instrument;

pub async fn categories(client: &ApiClient) -> Result<Listing<Category>> {
    Ok(client.get(admin::CATEGORIES).await?.into_listing()?)
}

pub async fn create_category(
    client: &ApiClient,
    draft: &CategoryDraft,
    image: Option<FilePart>,
) -> Result<Category> {
    let payload = Payload::with_files(draft, image.into_iter().collect())?;
    Ok(client
        .post_payload(admin::CATEGORIES, &payload)
        .await?
        .into_data()?)
}

pub async fn update_category(
    client: &ApiClient,
    id: &CategoryId,
    draft: &CategoryDraft,
    image: Option<FilePart>,
) -> Result<Category> {
    let payload = Payload::with_files(draft, image.into_iter().collect())?;
    Ok(client
        .put_payload(&admin::category(id.as_str()), &payload)
        .await?
        .into_data()?)
}

pub async fn delete_category(client: &ApiClient, id: &CategoryId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&admin::category(id.as_str()))
        .await?
        .into_ack()?)
}

#[instrument(skip(client))]
pub async fn products(client: &ApiClient, query: &ProductQuery) -> Result<Listing<Product>> {
    let pairs = query.pairs();
    Ok(client
        .get_with_query(admin::PRODUCTS, &pairs)
        .await?
        .into_listing()?)
}

pub async fn product(client: &ApiClient, id: &ProductId) -> Result<Product> {
    Ok(client.get(&admin::product(id.as_str())).await?.into_data()?)
}

#[instrument(skip(client, draft, images), fields(name = %draft.name, images = images.len()))]
pub async fn create_product(
    client: &ApiClient,
    draft: &ProductDraft,
    images: Vec<FilePart>,
) -> Result<Product> {
    let payload = Payload::with_files(draft, images)?;
    Ok(client
        .post_payload(admin::PRODUCTS, &payload)
        .await?
        .into_data()?)
}

#[instrument(skip(client, draft, images), fields(images = images.len()))]
pub async fn update_product(
    client: &ApiClient,
    id: &ProductId,
    draft: &ProductDraft,
    images: Vec<FilePart>,
) -> Result<Product> {
    let payload = Payload::with_files(draft, images)?;
    Ok(client
        .put_payload(&admin::product(id.as_str()), &payload)
        .await?
        .into_data()?)
}

pub async fn delete_product(client: &ApiClient, id: &ProductId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&admin::product(id.as_str()))
        .await?
        .into_ack()?)
}

/// Edit one variant; the backend answers with the whole product.
#[instrument(skip(client))]
pub async fn update_variant(
    client: &ApiClient,
    product_id: &ProductId,
    variant_id: &VariantId,
    draft: &VariantDraft,
) -> Result<Product> {
    Ok(client
        .put(
            &admin::product_variant(product_id.as_str(), variant_id.as_str()),
            draft,
        )
        .await?
        .into_data()?)
}
