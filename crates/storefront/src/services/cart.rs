//! Cart lines.

use serde_json::{Value, json};
use shopdesk_api::endpoints::user;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{CartAddition, CartItem, CartItemId, Listing};
use tracing::instrument;

/// Lines currently in the cart.
pub async fn cart(client: &ApiClient) -> Result<Listing<CartItem>> {
    Ok(client.get(user::CART).await?.into_listing()?)
}

/// Add a product (or one of its variants). The backend merges repeat
/// additions into the existing line.
#[instrument(skip(client))]
pub async fn add(client: &ApiClient, addition: &CartAddition) -> Result<CartItem> {
    Ok(client.post(user::CART, addition).await?.into_data()?)
}

/// Set a line's quantity.
#[instrument(skip(client))]
pub async fn update_quantity(client: &ApiClient, id: &CartItemId, quantity: u32) -> Result<CartItem> {
    Ok(client
        .put(&user::cart_item(id.as_str()), &json!({ "quantity": quantity }))
        .await?
        .into_data()?)
}

/// Remove one line.
#[instrument(skip(client))]
pub async fn remove(client: &ApiClient, id: &CartItemId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&user::cart_item(id.as_str()))
        .await?
        .into_ack()?)
}

/// Remove every line.
pub async fn clear(client: &ApiClient) -> Result<Option<String>> {
    Ok(client.delete::<Value>(user::CART).await?.into_ack()?)
}
