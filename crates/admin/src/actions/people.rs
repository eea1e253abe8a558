use shopdesk_api::ApiError;
use shopdesk_core::{
    AccountStatus, AdminDraft, AdminId, DriverDraft, DriverId, Email, SliceAction, UserId,
};
use tracing::instrument;

use crate::services;
use crate::state::AdminState;

fn check_admin(draft: &AdminDraft) -> Result<(), ApiError> {
    if draft.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }
    Email::parse(&draft.email).map_err(|e| ApiError::Validation(e.to_string()))?;
    Ok(())
}

fn check_driver(draft: &DriverDraft) -> Result<(), ApiError> {
    if draft.name.trim().is_empty() || draft.phone.trim().is_empty() {
        return Err(ApiError::Validation(
            "driver name and phone are required".to_string(),
        ));
    }
    Ok(())
}

impl AdminState {
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_admins(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.admins(),
            services::staff::list(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the form fails its checks or the request fails.
    #[instrument(skip_all, fields(email = %draft.email, role = %draft.role))]
    pub async fn create_admin(&self, draft: AdminDraft) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            check_admin(&draft)?;
            services::staff::create(client, &draft).await
        };
        self.dispatch(self.admins(), request, SliceAction::Created).await
    }

    /// # Errors
    ///
    /// Returns an error if the form fails its checks or the request fails.
    pub async fn update_admin(&self, id: &AdminId, draft: AdminDraft) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            check_admin(&draft)?;
            services::staff::update(client, id, &draft).await
        };
        self.dispatch(self.admins(), request, SliceAction::Updated).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_admin(&self, id: &AdminId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.admins(),
            services::staff::delete(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_drivers(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.drivers(),
            services::drivers::list(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if name or phone is empty or the request fails.
    pub async fn create_driver(&self, draft: DriverDraft) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            check_driver(&draft)?;
            services::drivers::create(client, &draft).await
        };
        self.dispatch(self.drivers(), request, SliceAction::Created).await
    }

    /// # Errors
    ///
    /// Returns an error if name or phone is empty or the request fails.
    pub async fn update_driver(&self, id: &DriverId, draft: DriverDraft) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            check_driver(&draft)?;
            services::drivers::update(client, id, &draft).await
        };
        self.dispatch(self.drivers(), request, SliceAction::Updated).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_driver(&self, id: &DriverId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.drivers(),
            services::drivers::delete(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_users(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.users(),
            services::users::list(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// Open one account; it becomes the user slice's `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn open_user(&self, id: &UserId) -> Result<(), ApiError> {
        self.dispatch(
            self.users(),
            services::users::get(self.client(), id),
            SliceAction::Fetched,
        )
        .await
    }

    /// Block or reactivate an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn update_user_status(&self, id: &UserId, status: AccountStatus) -> Result<(), ApiError> {
        self.dispatch(
            self.users(),
            services::users::update_status(self.client(), id, status),
            SliceAction::Updated,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.users(),
            services::users::delete(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }
}
