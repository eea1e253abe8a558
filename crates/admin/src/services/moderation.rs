//! Reviews and contact messages.

use serde_json::Value;
use shopdesk_api::endpoints::admin;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{Contact, ContactId, Listing, Review, ReviewId, ReviewStatus};

use super::status_body;

pub async fn reviews(client: &ApiClient) -> Result<Listing<Review>> {
    Ok(client.get(admin::REVIEWS).await?.into_listing()?)
}

/// Approve or reject a review.
pub async fn update_review_status(
    client: &ApiClient,
    id: &ReviewId,
    status: ReviewStatus,
) -> Result<Review> {
    Ok(client
        .put(&admin::review_status(id.as_str()), &status_body(status))
        .await?
        .into_data()?)
}

pub async fn delete_review(client: &ApiClient, id: &ReviewId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&admin::review(id.as_str()))
        .await?
        .into_ack()?)
}

pub async fn contacts(client: &ApiClient) -> Result<Listing<Contact>> {
    Ok(client.get(admin::CONTACTS).await?.into_listing()?)
}

pub async fn delete_contact(client: &ApiClient, id: &ContactId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&admin::contact(id.as_str()))
        .await?
        .into_ack()?)
}
