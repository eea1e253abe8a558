//! Service bookings.

use shopdesk_api::endpoints::user;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{Booking, BookingRequest, Listing};
use tracing::instrument;

#[instrument(skip(client))]
pub async fn create(client: &ApiClient, request: &BookingRequest) -> Result<Booking> {
    Ok(client.post(user::BOOKINGS, request).await?.into_data()?)
}

pub async fn list(client: &ApiClient) -> Result<Listing<Booking>> {
    Ok(client.get(user::BOOKINGS).await?.into_listing()?)
}
