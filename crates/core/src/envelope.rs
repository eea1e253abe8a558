//! The backend's response envelope.
//!
//! Every endpoint answers with `{ success, data, message?, count?, meta? }`.
//! [`Envelope`] decodes that shape once at the boundary and converts it into
//! an explicit success value or a [`Rejection`], so nothing downstream
//! inspects untyped JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-side pagination metadata attached to some listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Raw response body as sent by the backend.
///
/// `success` is `None` when the body omits it. Records and listings need
/// an explicit `true`; acknowledgements only fail on an explicit `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

/// The backend declined a request (`success: false`, or no `data` where
/// data was required).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or("request was not successful"))]
pub struct Rejection {
    /// Message supplied by the backend, if any.
    pub message: Option<String>,
}

/// A decoded collection response.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    /// The records, in backend order.
    pub items: Vec<T>,
    /// Display count sent alongside the data (may exceed `items.len()`).
    pub count: Option<u64>,
    /// Server-side pagination metadata, if sent.
    pub meta: Option<PageMeta>,
}

impl<T> Listing<T> {
    /// Wrap a plain vector with no count or meta.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self {
            items,
            count: None,
            meta: None,
        }
    }
}

impl<T> Envelope<T> {
    /// Build a successful envelope around `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: Some(true),
            data: Some(data),
            message: None,
            count: None,
            meta: None,
        }
    }

    /// Successful envelope with no body, as for a `204 No Content`.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            success: Some(true),
            data: None,
            message: None,
            count: None,
            meta: None,
        }
    }

    /// Build a failed envelope with a message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            data: None,
            message: Some(message.into()),
            count: None,
            meta: None,
        }
    }

    /// Extract `data` from a successful envelope.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] carrying the backend message when `success`
    /// is false or `data` is absent.
    pub fn into_data(self) -> Result<T, Rejection> {
        match (self.success, self.data) {
            (Some(true), Some(data)) => Ok(data),
            _ => Err(Rejection {
                message: self.message,
            }),
        }
    }

    /// Accept an envelope whose `data` is irrelevant (deletes, status
    /// toggles), returning the backend message.
    ///
    /// A body that omits `success` counts as accepted; the 2xx status
    /// already said so.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when `success` is explicitly false.
    pub fn into_ack(self) -> Result<Option<String>, Rejection> {
        if self.success != Some(false) {
            Ok(self.message)
        } else {
            Err(Rejection {
                message: self.message,
            })
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Extract a [`Listing`], keeping `count` and `meta`.
    ///
    /// A successful envelope without `data` is an empty listing.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] unless `success` is true.
    pub fn into_listing(self) -> Result<Listing<T>, Rejection> {
        if self.success != Some(true) {
            return Err(Rejection {
                message: self.message,
            });
        }
        Ok(Listing {
            items: self.data.unwrap_or_default(),
            count: self.count,
            meta: self.meta,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_keeps_count_and_meta() {
        let json = r#"{
            "success": true,
            "data": [1, 2, 3],
            "count": 42,
            "meta": {"page": 2, "totalPages": 14}
        }"#;
        let envelope: Envelope<Vec<u32>> = serde_json::from_str(json).unwrap();
        let listing = envelope.into_listing().unwrap();

        assert_eq!(listing.items, vec![1, 2, 3]);
        assert_eq!(listing.count, Some(42));
        assert_eq!(listing.meta.unwrap().total_pages, 14);
    }

    #[test]
    fn test_unsuccessful_envelope_is_rejected_with_message() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success": false, "message": "Out of stock"}"#).unwrap();
        let rejection = envelope.into_data().unwrap_err();
        assert_eq!(rejection.message.as_deref(), Some("Out of stock"));
        assert_eq!(rejection.to_string(), "Out of stock");
    }

    #[test]
    fn test_success_without_data_is_rejected_for_records() {
        let envelope: Envelope<u32> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(envelope.into_data().is_err());
    }

    #[test]
    fn test_ack_ignores_data() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"success": true, "message": "Deleted", "data": {"x": 1}}"#)
                .unwrap();
        assert_eq!(envelope.into_ack().unwrap().as_deref(), Some("Deleted"));
    }

    #[test]
    fn test_ack_without_success_field_is_accepted() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"message": "Category deleted"}"#).unwrap();
        assert_eq!(envelope.success, None);
        assert_eq!(
            envelope.into_ack().unwrap().as_deref(),
            Some("Category deleted")
        );

        let declined: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"success": false, "message": "In use"}"#).unwrap();
        assert_eq!(declined.into_ack().unwrap_err().message.as_deref(), Some("In use"));
    }
}
