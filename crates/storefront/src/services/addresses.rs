//! Saved shipping addresses.

use serde_json::Value;
use shopdesk_api::endpoints::user;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{Address, AddressDraft, AddressId, Listing};

pub async fn list(client: &ApiClient) -> Result<Listing<Address>> {
    Ok(client.get(user::ADDRESSES).await?.into_listing()?)
}

pub async fn create(client: &ApiClient, draft: &AddressDraft) -> Result<Address> {
    Ok(client.post(user::ADDRESSES, draft).await?.into_data()?)
}

pub async fn update(client: &ApiClient, id: &AddressId, draft: &AddressDraft) -> Result<Address> {
    Ok(client
        .put(&user::address(id.as_str()), draft)
        .await?
        .into_data()?)
}

pub async fn delete(client: &ApiClient, id: &AddressId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&user::address(id.as_str()))
        .await?
        .into_ack()?)
}
