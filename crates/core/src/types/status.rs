//! Status enums for various entities.
//!
//! The backend sends statuses as lowercase strings. Values this client does
//! not know decode to an `Unknown` variant so one unexpected record never
//! fails a whole listing.

use serde::{Deserialize, Serialize};

/// Lifecycle of a customer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Whether the customer may still cancel the order.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

/// Lifecycle of a service booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// Moderation state of a product review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// Whether an end-user account may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Blocked,
    #[serde(other)]
    Unknown,
}

/// Admin role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access including admin account management.
    SuperAdmin,
    /// Full access to store management features.
    #[default]
    Admin,
    /// Read-only access to store data.
    Viewer,
}

macro_rules! impl_status_text {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => $text,)+
                })
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(format!("invalid {}: {s}", stringify!($ty))),
                }
            }
        }
    };
}

impl_status_text!(OrderStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Processing => "processing",
    Shipped => "shipped",
    Delivered => "delivered",
    Cancelled => "cancelled",
    Unknown => "unknown",
});

impl_status_text!(BookingStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Completed => "completed",
    Cancelled => "cancelled",
    Unknown => "unknown",
});

impl_status_text!(ReviewStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    Unknown => "unknown",
});

impl_status_text!(AccountStatus {
    Active => "active",
    Blocked => "blocked",
    Unknown => "unknown",
});

impl_status_text!(AdminRole {
    SuperAdmin => "super_admin",
    Admin => "admin",
    Viewer => "viewer",
});

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_does_not_fail_decoding() {
        let status: OrderStatus = serde_json::from_str("\"returned\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
    }

    #[test]
    fn test_status_text_roundtrip() {
        assert_eq!("Shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!(BookingStatus::Completed.to_string(), "completed");
        assert_eq!("super_admin".parse::<AdminRole>().unwrap(), AdminRole::SuperAdmin);
        assert!("archived".parse::<ReviewStatus>().is_err());
    }

    #[test]
    fn test_cancellable_orders() {
        assert!(OrderStatus::Pending.is_cancellable());
        assert!(!OrderStatus::Shipped.is_cancellable());
    }
}
