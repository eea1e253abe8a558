//! Delivery drivers.

use serde_json::Value;
use shopdesk_api::endpoints::admin;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{Driver, DriverDraft, DriverId, Listing};

pub async fn list(client: &ApiClient) -> Result<Listing<Driver>> {
    Ok(client.get(admin::DRIVERS).await?.into_listing()?)
}

pub async fn create(client: &ApiClient, draft: &DriverDraft) -> Result<Driver> {
    Ok(client.post(admin::DRIVERS, draft).await?.into_data()?)
}

pub async fn update(client: &ApiClient, id: &DriverId, draft: &DriverDraft) -> Result<Driver> {
    Ok(client.put(&admin::driver(id.as_str()), draft).await?.into_data()?)
}

pub async fn delete(client: &ApiClient, id: &DriverId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&admin::driver(id.as_str()))
        .await?
        .into_ack()?)
}
