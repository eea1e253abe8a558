//! End-user accounts.

use serde_json::Value;
use shopdesk_api::endpoints::admin;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{AccountStatus, Listing, User, UserId};

use super::status_body;

pub async fn list(client: &ApiClient) -> Result<Listing<User>> {
    Ok(client.get(admin::USERS).await?.into_listing()?)
}

pub async fn get(client: &ApiClient, id: &UserId) -> Result<User> {
    Ok(client.get(&admin::user(id.as_str())).await?.into_data()?)
}

/// Block or reactivate an account.
pub async fn update_status(client: &ApiClient, id: &UserId, status: AccountStatus) -> Result<User> {
    Ok(client
        .put(&admin::user_status(id.as_str()), &status_body(status))
        .await?
        .into_data()?)
}

pub async fn delete(client: &ApiClient, id: &UserId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&admin::user(id.as_str()))
        .await?
        .into_ack()?)
}
