//! Admin service functions.
//!
//! One function per admin endpoint, each a thin call on the shared
//! [`ApiClient`](shopdesk_api::ApiClient). Every path here sits under the
//! admin prefix, so requests carry the admin token when one is stored.
//!
//! # Services
//!
//! - `auth` - Admin login and profile
//! - `staff` - Admin accounts
//! - `catalog` - Categories, products, and variants
//! - `content` - Blogs and banners (multipart when an image is attached)
//! - `orders` - Orders, statuses, shipping labels, driver assignment
//! - `bookings` - Service bookings
//! - `drivers` - Delivery drivers
//! - `moderation` - Reviews and contact messages
//! - `stock` - Stock levels
//! - `users` - End-user accounts

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod content;
pub mod drivers;
pub mod moderation;
pub mod orders;
pub mod staff;
pub mod stock;
pub mod users;

use serde::Serialize;
use serde_json::{Value, json};

/// `{ "status": status }` body shared by the status endpoints.
pub(crate) fn status_body<S: Serialize>(status: S) -> Value {
    json!({ "status": status })
}
