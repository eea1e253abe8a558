//! Async actions on [`StorefrontState`](crate::StorefrontState).
//!
//! Each action runs one service call through
//! [`dispatch`](shopdesk_api::dispatch), so the target slice goes
//! requested, then succeeded or failed. Actions return the typed error as
//! well; the slice keeps only its message.

mod account;
mod auth;
mod cart;
mod catalog;
mod orders;

use shopdesk_api::ApiError;
use shopdesk_core::Email;

/// Pre-submit email check shared by the login and registration forms.
pub(crate) fn check_email(raw: &str) -> Result<Email, ApiError> {
    Email::parse(raw).map_err(|e| ApiError::Validation(e.to_string()))
}
