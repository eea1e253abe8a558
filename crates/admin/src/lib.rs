//! Shopdesk Admin - the administrative state container.
//!
//! [`AdminState`] holds one slice per managed resource (staff, catalog,
//! orders, bookings, content, drivers, reviews, contacts, stock, users)
//! and exposes an async action for every backend operation on them.
//! Requests to `/admin` routes carry the admin token; see
//! [`shopdesk_api::Session::select_token`].

#![cfg_attr(not(test), forbid(unsafe_code))]

mod actions;
pub mod filters;
pub mod labels;
pub mod services;
pub mod state;

pub use filters::DEFAULT_LOW_STOCK_THRESHOLD;
pub use state::AdminState;
