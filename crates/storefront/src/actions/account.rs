use shopdesk_api::ApiError;
use shopdesk_core::{
    AddressDraft, AddressId, BookingRequest, ContactMessage, ReviewSubmission, SliceAction,
    ValueAction,
};
use tracing::instrument;

use super::check_email;
use crate::services;
use crate::state::StorefrontState;

impl StorefrontState {
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_bookings(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.bookings(),
            services::bookings::list(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// Book a service slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the service name is empty or the request fails.
    #[instrument(skip(self))]
    pub async fn book(&self, request: BookingRequest) -> Result<(), ApiError> {
        let client = self.client();
        let call = async {
            if request.service.trim().is_empty() {
                return Err(ApiError::Validation("service is required".to_string()));
            }
            services::bookings::create(client, &request).await
        };
        self.dispatch(self.bookings(), call, SliceAction::Created).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn load_addresses(&self) -> Result<(), ApiError> {
        self.dispatch(
            self.addresses(),
            services::addresses::list(self.client()),
            SliceAction::Listed,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if required fields are empty or the request fails.
    pub async fn add_address(&self, draft: AddressDraft) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            check_address(&draft)?;
            services::addresses::create(client, &draft).await
        };
        self.dispatch(self.addresses(), request, SliceAction::Created).await
    }

    /// # Errors
    ///
    /// Returns an error if required fields are empty or the request fails.
    pub async fn update_address(&self, id: &AddressId, draft: AddressDraft) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            check_address(&draft)?;
            services::addresses::update(client, id, &draft).await
        };
        self.dispatch(self.addresses(), request, SliceAction::Updated).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_address(&self, id: &AddressId) -> Result<(), ApiError> {
        let removed = id.clone();
        self.dispatch(
            self.addresses(),
            services::addresses::delete(self.client(), id),
            move |_| SliceAction::Deleted(removed),
        )
        .await
    }

    /// Submit a product review.
    ///
    /// # Errors
    ///
    /// Returns an error if the rating is outside 1 to 5 or the request
    /// fails.
    #[instrument(skip(self))]
    pub async fn submit_review(&self, submission: ReviewSubmission) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            if !submission.has_valid_rating() {
                return Err(ApiError::Validation(format!(
                    "rating must be between {} and {}",
                    ReviewSubmission::MIN_RATING,
                    ReviewSubmission::MAX_RATING
                )));
            }
            services::reviews::submit(client, &submission).await
        };
        self.dispatch(self.reviews(), request, SliceAction::Created).await
    }

    /// Send the contact form; the acknowledgement lands in the contact
    /// slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is malformed, the message is empty,
    /// or the request fails.
    pub async fn send_contact(&self, message: ContactMessage) -> Result<(), ApiError> {
        let client = self.client();
        let request = async {
            check_email(&message.email)?;
            if message.message.trim().is_empty() {
                return Err(ApiError::Validation("message is required".to_string()));
            }
            services::contact::send(client, &message).await
        };
        self.dispatch(self.contact(), request, |ack| {
            ValueAction::Loaded(ack.unwrap_or_else(|| "Message sent".to_string()))
        })
        .await
    }
}

fn check_address(draft: &AddressDraft) -> Result<(), ApiError> {
    let missing = [
        ("line1", draft.line1.as_str()),
        ("city", draft.city.as_str()),
        ("postal code", draft.postal_code.as_str()),
    ]
    .into_iter()
    .find(|(_, value)| value.trim().is_empty());

    match missing {
        Some((field, _)) => Err(ApiError::Validation(format!("{field} is required"))),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopdesk_core::failure_message;

    use super::*;

    #[test]
    fn test_address_check_names_first_missing_field() {
        let draft = AddressDraft {
            line1: "12 MG Road".to_string(),
            city: " ".to_string(),
            ..AddressDraft::default()
        };
        let err = check_address(&draft).unwrap_err();
        assert_eq!(err.message(), "city is required");
        assert_ne!(err.message(), failure_message(None));
    }
}
