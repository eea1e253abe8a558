//! Customer feedback: product reviews and contact-form messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Extra, Product, Related, User};
use crate::types::{ContactId, ProductId, ReviewId, ReviewStatus, UserId};

/// A product review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: ReviewId,
    pub product: Related<ProductId, Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Related<UserId, User>>,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A message left through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(alias = "_id")]
    pub id: ContactId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body for submitting a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub product_id: ProductId,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ReviewSubmission {
    /// Lowest accepted star rating.
    pub const MIN_RATING: u8 = 1;
    /// Highest accepted star rating.
    pub const MAX_RATING: u8 = 5;

    /// Whether the rating is within the accepted star range.
    #[must_use]
    pub const fn has_valid_rating(&self) -> bool {
        self.rating >= Self::MIN_RATING && self.rating <= Self::MAX_RATING
    }
}

/// Body for the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let mut review = ReviewSubmission {
            product_id: ProductId::new("p1"),
            rating: 5,
            comment: None,
        };
        assert!(review.has_valid_rating());
        review.rating = 0;
        assert!(!review.has_valid_rating());
        review.rating = 6;
        assert!(!review.has_valid_rating());
    }
}
