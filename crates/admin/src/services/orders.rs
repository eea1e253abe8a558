//! Orders, order status, shipping labels, and driver assignment.

use serde_json::{Value, json};
use shopdesk_api::endpoints::admin;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{DriverId, Listing, Order, OrderId, OrderStatus};
use tracing::instrument;

use super::status_body;

pub async fn list(client: &ApiClient) -> Result<Listing<Order>> {
    Ok(client.get(admin::ORDERS).await?.into_listing()?)
}

pub async fn get(client: &ApiClient, id: &OrderId) -> Result<Order> {
    Ok(client.get(&admin::order(id.as_str())).await?.into_data()?)
}

#[instrument(skip(client))]
pub async fn update_status(client: &ApiClient, id: &OrderId, status: OrderStatus) -> Result<Order> {
    Ok(client
        .put(&admin::order_status(id.as_str()), &status_body(status))
        .await?
        .into_data()?)
}

pub async fn delete(client: &ApiClient, id: &OrderId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&admin::order(id.as_str()))
        .await?
        .into_ack()?)
}

/// The order's shipping label document.
#[instrument(skip(client))]
pub async fn label(client: &ApiClient, id: &OrderId) -> Result<Vec<u8>> {
    client.get_bytes(&admin::order_label(id.as_str())).await
}

#[instrument(skip(client))]
pub async fn assign_driver(client: &ApiClient, id: &OrderId, driver: &DriverId) -> Result<Order> {
    Ok(client
        .put(&admin::assign_driver(id.as_str()), &json!({ "driverId": driver }))
        .await?
        .into_data()?)
}
