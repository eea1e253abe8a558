//! Contact form.

use serde_json::Value;
use shopdesk_api::endpoints::user;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::ContactMessage;

/// Send a contact message; returns the backend's acknowledgement text.
pub async fn send(client: &ApiClient, message: &ContactMessage) -> Result<Option<String>> {
    Ok(client
        .post::<Value, _>(user::CONTACT, message)
        .await?
        .into_ack()?)
}
