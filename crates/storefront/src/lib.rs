//! Shopdesk Storefront - what an end user can see and do.
//!
//! [`StorefrontState`] is the application store for the shopping surface:
//! one slice per resource behind its own lock, fed by async actions that
//! call the backend through [`services`].
//!
//! ```rust,ignore
//! let client = ApiClient::from_config(&ApiConfig::from_env()?)?;
//! let store = StorefrontState::new(client);
//!
//! store.load_products(&ProductQuery::default()).await?;
//! store.select_all_cart_items().await;
//! let order = store.checkout(address_id, "cod").await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod actions;
pub mod cart;
pub mod services;
pub mod state;

pub use cart::{CartAction, CartSlice};
pub use state::StorefrontState;
