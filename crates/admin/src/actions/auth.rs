use shopdesk_api::{ApiError, Role};
use shopdesk_core::{Credentials, Email, ValueAction};
use tracing::{info, instrument};

use crate::services;
use crate::state::AdminState;

impl AdminState {
    /// Sign in as an admin and persist the admin token and record.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is malformed or the credentials are
    /// rejected.
    #[instrument(skip_all)]
    pub async fn login(&self, credentials: Credentials) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            let email =
                Email::parse(&credentials.email).map_err(|e| ApiError::Validation(e.to_string()))?;
            let credentials = Credentials {
                email: email.into_inner(),
                ..credentials
            };
            let grant = services::auth::login(client, &credentials).await?;
            client
                .session()
                .store_login(Role::Admin, &grant.token, &grant.user)?;
            info!(admin = %grant.user.id, role = %grant.user.role, "admin signed in");
            Ok::<_, ApiError>(grant.user)
        };
        self.dispatch(self.auth(), request, ValueAction::Loaded).await
    }

    /// Sign out: reset every slice and drop the persisted admin keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store cannot be written.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.reset().await;
        self.client().session().clear_role(Role::Admin)?;
        info!("admin signed out");
        Ok(())
    }

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
}
