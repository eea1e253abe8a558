//! Categories, products, banners, and blogs.

use shopdesk_api::endpoints::user;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{
    Banner, Blog, BlogId, Category, Listing, Product, ProductId, ProductQuery, Review,
};
use tracing::instrument;

pub async fn categories(client: &ApiClient) -> Result<Listing<Category>> {
    Ok(client.get(user::CATEGORIES).await?.into_listing()?)
}

/// Products matching `query`. An empty query lists everything.
#[instrument(skip(client))]
pub async fn products(client: &ApiClient, query: &ProductQuery) -> Result<Listing<Product>> {
    let pairs = query.pairs();
    Ok(client
        .get_with_query(user::PRODUCTS, &pairs)
        .await?
        .into_listing()?)
}

pub async fn product(client: &ApiClient, id: &ProductId) -> Result<Product> {
    Ok(client.get(&user::product(id.as_str())).await?.into_data()?)
}

/// Approved reviews of one product.
pub async fn product_reviews(client: &ApiClient, id: &ProductId) -> Result<Listing<Review>> {
    Ok(client
        .get(&user::product_reviews(id.as_str()))
        .await?
        .into_listing()?)
}

pub async fn banners(client: &ApiClient) -> Result<Listing<Banner>> {
    Ok(client.get(user::BANNERS).await?.into_listing()?)
}

pub async fn blogs(client: &ApiClient) -> Result<Listing<Blog>> {
    Ok(client.get(user::BLOGS).await?.into_listing()?)
}

pub async fn blog(client: &ApiClient, id: &BlogId) -> Result<Blog> {
    Ok(client.get(&user::blog(id.as_str())).await?.into_data()?)
}
