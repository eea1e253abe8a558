//! Shopdesk API - the single HTTP client for the Shopdesk backend.
//!
//! Every data operation in Shopdesk is a direct call to an external JSON
//! REST backend. This crate owns the pieces every call shares:
//!
//! - [`ApiClient`] - base URL, timeout, and the request/response
//!   interceptors (token selection, content type, 401 session clearing)
//! - [`endpoints`] - the path registry, grouped by admin and user routes
//! - [`Session`] - persisted tokens and records over a [`KeyValueStore`]
//! - [`RetryPolicy`] - opt-in retry with backoff for transient failures
//! - [`dispatch`] - runs one request as a requested / succeeded / failed
//!   transition on a slice
//!
//! # Configuration
//!
//! See [`ApiConfig::from_env`] for the environment variables read.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod payload;
pub mod retry;
pub mod session;
pub mod storage;

pub use action::dispatch;
pub use client::ApiClient;
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, Result};
pub use payload::{FilePart, MultipartBody, Payload};
pub use retry::{Backoff, RetryPolicy};
pub use session::{InvalidationScope, Role, Session};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
