//! Registration, login, and profile.

use shopdesk_api::endpoints::user;
use shopdesk_api::{ApiClient, Result};
use shopdesk_core::{Credentials, LoginGrant, ProfileUpdate, Registration, User};
use tracing::instrument;

/// Create an account. The backend signs the new user in.
#[instrument(skip_all, fields(email = %registration.email))]
pub async fn register(client: &ApiClient, registration: &Registration) -> Result<LoginGrant<User>> {
    Ok(client.post(user::REGISTER, registration).await?.into_data()?)
}

/// Exchange credentials for a token.
#[instrument(skip_all, fields(email = %credentials.email))]
pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<LoginGrant<User>> {
    Ok(client.post(user::LOGIN, credentials).await?.into_data()?)
}

/// The signed-in user's profile.
pub async fn profile(client: &ApiClient) -> Result<User> {
    Ok(client.get(user::PROFILE).await?.into_data()?)
}

/// Update name or phone.
pub async fn update_profile(client: &ApiClient, update: &ProfileUpdate) -> Result<User> {
    Ok(client.put(user::PROFILE, update).await?.into_data()?)
}
