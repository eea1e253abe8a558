//! Admin accounts.

use serde_json::Value;
use shopdesk_api::endpoints::admin;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{Admin, AdminDraft, AdminId, Listing};

pub async fn list(client: &ApiClient) -> Result<Listing<Admin>> {
    Ok(client.get(admin::ADMINS).await?.into_listing()?)
}

pub async fn create(client: &ApiClient, draft: &AdminDraft) -> Result<Admin> {
    Ok(client.post(admin::ADMINS, draft).await?.into_data()?)
}

pub async fn update(client: &ApiClient, id: &AdminId, draft: &AdminDraft) -> Result<Admin> {
    Ok(client.put(&admin::admin(id.as_str()), draft).await?.into_data()?)
}

pub async fn delete(client: &ApiClient, id: &AdminId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&admin::admin(id.as_str()))
        .await?
        .into_ack()?)
}
