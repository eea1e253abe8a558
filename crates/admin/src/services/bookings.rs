//! Service bookings.

use serde_json::Value;
use shopdesk_api::endpoints::admin;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{Booking, BookingId, BookingStatus, Listing};

use super::status_body;

pub async fn list(client: &ApiClient) -> Result<Listing<Booking>> {
    Ok(client.get(admin::BOOKINGS).await?.into_listing()?)
}

pub async fn update_status(
    client: &ApiClient,
    id: &BookingId,
    status: BookingStatus,
) -> Result<Booking> {
    Ok(client
        .put(&admin::booking_status(id.as_str()), &status_body(status))
        .await?
        .into_data()?)
}

pub async fn delete(client: &ApiClient, id: &BookingId) -> Result<Option<String>> {
    Ok(client
        .delete::<Value>(&admin::booking(id.as_str()))
        .await?
        .into_ack()?)
}
