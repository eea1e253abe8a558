//! Async actions on [`AdminState`](crate::AdminState).
//!
//! Same shape as the storefront actions: one service call per action, run
//! through [`dispatch`](shopdesk_api::dispatch) against the owning slice.
//! Mutations update the slice from the response; callers that want the
//! authoritative list re-fetch it afterwards.

mod auth;
mod catalog;
mod content;
mod moderation;
mod orders;
mod people;
mod stock;
