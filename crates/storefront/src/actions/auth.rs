use shopdesk_api::{ApiError, Role};
use shopdesk_core::{Credentials, ProfileUpdate, Registration, ValueAction};
use tracing::{info, instrument};

use super::check_email;
use crate::services;
use crate::state::StorefrontState;

impl StorefrontState {
    /// Create an account and sign in with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the form fails its checks or the backend
    /// rejects the registration.
    #[instrument(skip_all)]
    pub async fn register(&self, registration: Registration) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            let email = check_email(&registration.email)?;
            if registration.name.trim().is_empty() {
                return Err(ApiError::Validation("name is required".to_string()));
            }
            let registration = Registration {
                email: email.into_inner(),
                ..registration
            };
            let grant = services::auth::register(client, &registration).await?;
            client
                .session()
                .store_login(Role::User, &grant.token, &grant.user)?;
            info!(user = %grant.user.id, "registered");
            Ok::<_, ApiError>(grant.user)
        };
        self.dispatch(self.auth(), request, ValueAction::Loaded).await
    }

    /// Sign in and persist the token and user record.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is malformed or the credentials are
    /// rejected.
    #[instrument(skip_all)]
    pub async fn login(&self, credentials: Credentials) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            let email = check_email(&credentials.email)?;
            let credentials = Credentials {
                email: email.into_inner(),
                ..credentials
            };
            let grant = services::auth::login(client, &credentials).await?;
            client
                .session()
                .store_login(Role::User, &grant.token, &grant.user)?;
            info!(user = %grant.user.id, "signed in");
            Ok::<_, ApiError>(grant.user)
        };
        self.dispatch(self.auth(), request, ValueAction::Loaded).await
    }

    /// Sign out: reset every slice and drop the persisted user keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store cannot be written.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.reset().await;
        self.client().session().clear_role(Role::User)?;
        info!("signed out");
        Ok(())
    }

    /// Refresh the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_profile(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.auth(),
            services::auth::profile(self.client()),
            ValueAction::Loaded,
        )
        .await
    }

    /// Save profile changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<(), ApiError> {
        self.dispatch(
            self.auth(),
            services::auth::update_profile(self.client(), &update),
            ValueAction::Loaded,
        )
        .await
    }
}
