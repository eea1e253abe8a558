//! Admin login and profile.

use shopdesk_api::endpoints::admin;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{Admin, Credentials, LoginGrant};
use tracing::instrument;

/// Exchange admin credentials for an admin token.
#[instrument(skip_all, fields(email = %credentials.email))]
pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<LoginGrant<Admin>> {
    Ok(client.post(admin::LOGIN, credentials).await?.into_data()?)
}

pub async fn profile(client: &ApiClient) -> Result<Admin> {
    Ok(client.get(admin::PROFILE).await?.into_data()?)
}
