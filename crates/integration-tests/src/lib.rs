//! Integration tests for Shopdesk.
//!
//! Each test starts a [`wiremock`] server standing in for the backend and
//! points a real [`ApiClient`] at it, with local storage in a temporary
//! directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopdesk-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;
use std::time::Duration;

use serde_json::{Value, json};
use shopdesk_admin::AdminState;
use shopdesk_api::{ApiClient, ApiConfig, InvalidationScope, RetryPolicy, Role};
use shopdesk_storefront::StorefrontState;
use tempfile::TempDir;
use wiremock::{MockServer, ResponseTemplate};

/// A mock backend plus a scratch directory for persisted state.
pub struct Backend {
    pub server: MockServer,
    dir: TempDir,
}

impl Backend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Where the local store is persisted.
    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join("local-storage.json")
    }

    /// Scratch directory for files a test writes.
    #[must_use]
    pub fn scratch(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    /// Client configuration pointing at the mock server, no retries.
    #[must_use]
    pub fn config(&self) -> ApiConfig {
        let mut config = ApiConfig::new(self.server.uri().parse().unwrap());
        config.timeout = Duration::from_secs(5);
        config.state_path = self.state_path();
        config
    }

    #[must_use]
    pub fn client_with(&self, config: &ApiConfig) -> ApiClient {
        ApiClient::from_config(config).unwrap()
    }

    #[must_use]
    pub fn client(&self) -> ApiClient {
        self.client_with(&self.config())
    }

    #[must_use]
    pub fn storefront(&self) -> StorefrontState {
        StorefrontState::new(self.client())
    }

    #[must_use]
    pub fn admin(&self) -> AdminState {
        AdminState::new(self.client())
    }

    /// Client that retries transient failures without waiting.
    #[must_use]
    pub fn retrying_client(&self, retries: u32) -> ApiClient {
        let mut config = self.config();
        config.retry = RetryPolicy::new(retries).with_backoff(shopdesk_api::Backoff::None);
        self.client_with(&config)
    }

    /// Client whose 401 handling only clears the failing role.
    #[must_use]
    pub fn role_scoped_client(&self) -> ApiClient {
        let mut config = self.config();
        config.unauthorized_scope = InvalidationScope::Role;
        self.client_with(&config)
    }
}

/// Seed both roles' tokens into a client's session.
pub fn sign_in_both(client: &ApiClient) {
    let session = client.session();
    session
        .store_login(Role::User, "user-token", &user("u1", "Asha"))
        .unwrap();
    session
        .store_login(Role::Admin, "admin-token", &admin("a1", "Ops"))
        .unwrap();
}

/// `200 {success: true, data}`.
#[must_use]
pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

/// `200 {success: true, data, count}`.
#[must_use]
pub fn listing(data: Value, count: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "data": data,
        "count": count,
    }))
}

/// `200 {success: true, message}` with no data.
#[must_use]
pub fn ack(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": message }))
}

/// Non-2xx with a `{success: false, message}` body.
#[must_use]
pub fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "success": false, "message": message }))
}

#[must_use]
pub fn user(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "status": "active",
    })
}

#[must_use]
pub fn admin(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "role": "admin",
    })
}

#[must_use]
pub fn product(id: &str, name: &str, price: f64) -> Value {
    json!({ "_id": id, "name": name, "price": price })
}

#[must_use]
pub fn cart_line(id: &str, product_id: &str, quantity: u32, price: f64) -> Value {
    json!({ "_id": id, "product": product_id, "quantity": quantity, "price": price })
}

#[must_use]
pub fn order(id: &str, status: &str, total: f64) -> Value {
    json!({ "_id": id, "status": status, "totalAmount": total, "items": [] })
}

/// Value of `Authorization` on a received request, if any.
#[must_use]
pub fn authorization(request: &wiremock::Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
