//! Placing, listing, and cancelling orders.

use serde_json::json;
use shopdesk_api::endpoints::user;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{Listing, Order, OrderId, OrderPlacement};
use tracing::instrument;

/// Place an order for the given cart lines.
#[instrument(skip(client), fields(lines = placement.cart_item_ids.len()))]
pub async fn place(client: &ApiClient, placement: &OrderPlacement) -> Result<Order> {
    Ok(client.post(user::ORDERS, placement).await?.into_data()?)
}

/// The signed-in user's orders, newest first as sent by the backend.
pub async fn list(client: &ApiClient) -> Result<Listing<Order>> {
    Ok(client.get(user::ORDERS).await?.into_listing()?)
}

pub async fn get(client: &ApiClient, id: &OrderId) -> Result<Order> {
    Ok(client.get(&user::order(id.as_str())).await?.into_data()?)
}

/// Cancel a pending or confirmed order; returns the updated order.
#[instrument(skip(client))]
pub async fn cancel(client: &ApiClient, id: &OrderId) -> Result<Order> {
    Ok(client
        .put(&user::cancel_order(id.as_str()), &json!({}))
        .await?
        .into_data()?)
}
