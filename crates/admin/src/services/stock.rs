//! Stock levels.

use serde_json::json;
use shopdesk_api::endpoints::admin;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{Listing, StockId, StockItem};
use tracing::instrument;

pub async fn list(client: &ApiClient) -> Result<Listing<StockItem>> {
    Ok(client.get(admin::STOCK).await?.into_listing()?)
}

/// Set the on-hand quantity of one stock item.
#[instrument(skip(client))]
pub async fn update(client: &ApiClient, id: &StockId, quantity: u32) -> Result<StockItem> {
    Ok(client
        .put(&admin::stock_item(id.as_str()), &json!({ "quantity": quantity }))
        .await?
        .into_data()?)
}
