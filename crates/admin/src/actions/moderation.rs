use rust_decimal::Decimal;
use shopdesk_api::ApiError;
use shopdesk_core::{ContactId, Review, ReviewId, ReviewStatus, SliceAction};
use tracing::instrument;

use crate::filters::{average_rating, reviews_with_status};
use crate::services;
use crate::state::AdminState;

impl AdminState {
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_reviews(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.reviews(),
            services::moderation::reviews(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// Approve or reject a review.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn update_review_status(
        &self,
        id: &ReviewId,
        status: ReviewStatus,
    ) -> Result<(), ApiError> {
        self.dispatch(
            self.reviews(),
            services::moderation::update_review_status(self.client(), id, status),
            SliceAction::Updated,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_review(&self, id: &ReviewId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.reviews(),
            services::moderation::delete_review(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }

    /// Loaded reviews with the given status.
    pub async fn reviews_with_status(&self, status: ReviewStatus) -> Vec<Review> {
        let reviews = self.reviews().read().await;
        reviews_with_status(&reviews.items, status)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Mean rating over the loaded reviews, optionally only those with
    /// `status`.
    pub async fn average_rating(&self, status: Option<ReviewStatus>) -> Option<Decimal> {
        let reviews = self.reviews().read().await;
        match status {
            Some(status) => average_rating(reviews_with_status(&reviews.items, status)),
            None => average_rating(&reviews.items),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_contacts(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.contacts(),
            services::moderation::contacts(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_contact(&self, id: &ContactId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.contacts(),
            services::moderation::delete_contact(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }
}
