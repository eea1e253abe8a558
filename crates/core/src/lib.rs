//! Shopdesk Core - Shared types library.
//!
//! This crate provides common types used across all Shopdesk components:
//! - `api` - HTTP client, session storage and endpoint registry
//! - `storefront` - End-user state container and actions
//! - `admin` - Administrative state container and actions
//! - `cli` - The `shopdesk` console
//!
//! # Architecture
//!
//! The core crate contains only types and pure reducers - no I/O, no HTTP
//! clients, no storage. This keeps it lightweight and allows it to be used
//! anywhere, including in tests that never touch the network.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, and statuses
//! - [`resources`] - Records mirrored from the backend
//! - [`envelope`] - The `{ success, data, message, count, meta }` response shape
//! - [`pagination`] - Client-side page windows over fetched collections
//! - [`slice`] - Three-phase request state and its reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod envelope;
pub mod pagination;
pub mod resources;
pub mod slice;
pub mod types;

pub use envelope::{Envelope, Listing, PageMeta, Rejection};
pub use pagination::Paginator;
pub use resources::*;
pub use slice::{
    FALLBACK_ERROR, Record, Reducer, ResourceSlice, SliceAction, ValueAction, ValueSlice,
    failure_message,
};
pub use types::*;
