//! Storefront service functions.
//!
//! One function per user-facing endpoint. Each is a thin call on the
//! shared [`ApiClient`](shopdesk_api::ApiClient) that unwraps the response
//! envelope into a record, a [`Listing`](shopdesk_core::Listing), or an
//! acknowledgement. No state is touched here; the actions in
//! [`crate::state`] feed these results into slices.

pub mod addresses;
pub mod auth;
pub mod bookings;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod orders;
pub mod reviews;
