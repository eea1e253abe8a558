//! Errors raised while talking to the backend.
//!
//! The taxonomy is flat: whatever went wrong, slice state only
//! ever stores [`ApiError::message`].

use shopdesk_core::{Rejection, failure_message};
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur when calling the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error: {status} - {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    /// The backend answered 401; the persisted session has been cleared.
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("session expired"))]
    Unauthorized { message: Option<String> },

    /// The backend answered 2xx with `success: false`.
    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),

    /// The response body was not the expected envelope.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Persisted session storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A form failed its pre-submit check.
    #[error("{0}")]
    Validation(String),

    /// A file attachment could not be read.
    #[error("Attachment error: {0}")]
    Attachment(#[from] std::io::Error),
}

impl ApiError {
    /// The human-readable message stored in slice state.
    ///
    /// Backend-provided messages and form checks are shown as-is; every
    /// other failure becomes [`shopdesk_core::FALLBACK_ERROR`].
    #[must_use]
    pub fn message(&self) -> String {
        let message = match self {
            Self::Api { message, .. } | Self::Unauthorized { message } => message.clone(),
            Self::Rejected(rejection) => rejection.message.clone(),
            Self::Validation(message) => Some(message.clone()),
            _ => None,
        };
        failure_message(message)
    }

    /// HTTP status of the response that caused the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether retrying the same request could succeed: connection
    /// failures, timeouts, and 5xx answers.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(err) => err.is_timeout() || err.is_connect(),
            Self::Api { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use shopdesk_core::FALLBACK_ERROR;

    use super::*;

    #[test]
    fn test_message_prefers_backend_text() {
        let err = ApiError::Api {
            status: 422,
            message: Some("Category name already exists".into()),
        };
        assert_eq!(err.message(), "Category name already exists");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_message_falls_back() {
        let err = ApiError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.message(), FALLBACK_ERROR);
        assert_eq!(ApiError::Parse("eof".into()).message(), FALLBACK_ERROR);
    }

    #[test]
    fn test_rejection_message_is_surfaced() {
        let err = ApiError::from(Rejection {
            message: Some("Coupon expired".into()),
        });
        assert_eq!(err.message(), "Coupon expired");
        assert!(!err.is_transient());
    }

    #[test]
    fn test_only_server_errors_are_transient() {
        let server = ApiError::Api {
            status: 503,
            message: None,
        };
        let client = ApiError::Api {
            status: 404,
            message: None,
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
        assert!(!ApiError::Unauthorized { message: None }.is_transient());
    }
}
