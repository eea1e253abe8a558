//! Persisted session: tokens, signed-in records, and label bookkeeping.
//!
//! Two stores back a session. The local store survives restarts and holds
//! everything under [`keys`]; the session store lives for the process.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::{KeyValueStore, MemoryStore, StorageError};

/// Keys used in the local store.
pub mod keys {
    /// End-user bearer token.
    pub const USER_TOKEN: &str = "token";
    /// Signed-in end-user record (JSON).
    pub const USER: &str = "user";
    /// Admin bearer token.
    pub const ADMIN_TOKEN: &str = "adminToken";
    /// Signed-in admin record (JSON).
    pub const ADMIN: &str = "admin";
    /// Order ids whose shipping label was downloaded (JSON array).
    pub const DOWNLOADED_LABELS: &str = "downloadedLabels";
}

/// Which credential a request travels with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    const fn keys(self) -> [&'static str; 2] {
        match self {
            Self::User => [keys::USER_TOKEN, keys::USER],
            Self::Admin => [keys::ADMIN_TOKEN, keys::ADMIN],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Admin => "admin",
        })
    }
}

/// What a 401 response clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidationScope {
    /// Both stores, every key.
    #[default]
    All,
    /// Only the token and record of the role the failing request used.
    Role,
}

impl FromStr for InvalidationScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "role" => Ok(Self::Role),
            other => Err(format!("expected `all` or `role`, got `{other}`")),
        }
    }
}

/// Client-side session over a local and a session store.
#[derive(Clone)]
pub struct Session {
    local: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    admin_prefix: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("local_keys", &self.local.keys())
            .field("session_keys", &self.session.keys())
            .field("admin_prefix", &self.admin_prefix)
            .finish()
    }
}

impl Session {
    /// Session over the given stores.
    pub fn new(
        local: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
        admin_prefix: impl Into<String>,
    ) -> Self {
        Self {
            local,
            session,
            admin_prefix: admin_prefix.into(),
        }
    }

    /// Session whose stores are both in memory.
    #[must_use]
    pub fn in_memory(admin_prefix: impl Into<String>) -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            admin_prefix,
        )
    }

    /// The persistent store.
    #[must_use]
    pub fn local(&self) -> &dyn KeyValueStore {
        self.local.as_ref()
    }

    /// The process-lifetime store.
    #[must_use]
    pub fn session(&self) -> &dyn KeyValueStore {
        self.session.as_ref()
    }

    /// Whether `path` is served by the admin routes.
    ///
    /// `/admin`, `/admin/orders` and `/admin?x=1` match; `/administrator`
    /// does not.
    #[must_use]
    pub fn is_admin_path(&self, path: &str) -> bool {
        path.strip_prefix(self.admin_prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
    }

    /// Token to attach to a request for `path`.
    ///
    /// Admin paths prefer the admin token; anything else (including an
    /// admin path with no admin token) falls back to the end-user token.
    #[must_use]
    pub fn select_token(&self, path: &str) -> Option<(Role, SecretString)> {
        if self.is_admin_path(path)
            && let Some(token) = self.token(Role::Admin)
        {
            return Some((Role::Admin, token));
        }
        self.token(Role::User).map(|token| (Role::User, token))
    }

    /// Stored token for `role`.
    #[must_use]
    pub fn token(&self, role: Role) -> Option<SecretString> {
        let [token_key, _] = role.keys();
        self.local
            .get(token_key)
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
    }

    /// Whether a token is stored for `role`.
    #[must_use]
    pub fn is_signed_in(&self, role: Role) -> bool {
        self.token(role).is_some()
    }

    /// Persist a login: the token and the signed-in record.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store cannot be written.
    pub fn store_login<R: Serialize>(
        &self,
        role: Role,
        token: &str,
        record: &R,
    ) -> Result<(), StorageError> {
        let [token_key, record_key] = role.keys();
        self.local.set(token_key, token)?;
        match serde_json::to_string(record) {
            Ok(json) => self.local.set(record_key, &json)?,
            Err(err) => tracing::warn!(%role, error = %err, "signed-in record not persisted"),
        }
        tracing::info!(%role, "session stored");
        Ok(())
    }

    /// Signed-in record for `role`, if stored and decodable.
    #[must_use]
    pub fn record<R: DeserializeOwned>(&self, role: Role) -> Option<R> {
        let [_, record_key] = role.keys();
        let raw = self.local.get(record_key)?;
        serde_json::from_str(&raw).ok()
    }

    /// Remove the token and record of `role` from both stores.
    ///
    /// # Errors
    ///
    /// Returns an error if a store cannot be written.
    pub fn clear_role(&self, role: Role) -> Result<usize, StorageError> {
        let mut removed = 0;
        for key in role.keys() {
            removed += usize::from(self.local.remove(key)?);
            removed += usize::from(self.session.remove(key)?);
        }
        tracing::info!(%role, removed, "session cleared");
        Ok(removed)
    }

    /// Handle a 401 for a request to `path`.
    ///
    /// Returns how many keys were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if a store cannot be written.
    pub fn invalidate(&self, scope: InvalidationScope, path: &str) -> Result<usize, StorageError> {
        match scope {
            InvalidationScope::All => Ok(self.local.clear()? + self.session.clear()?),
            InvalidationScope::Role => {
                let role = if self.is_admin_path(path) {
                    Role::Admin
                } else {
                    Role::User
                };
                self.clear_role(role)
            }
        }
    }

    /// Order ids whose label has been downloaded, oldest first.
    #[must_use]
    pub fn downloaded_labels(&self) -> Vec<String> {
        self.local
            .get(keys::DOWNLOADED_LABELS)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Record a label download. Returns `false` if it was already recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store cannot be written.
    pub fn mark_label_downloaded(&self, order_id: &str) -> Result<bool, StorageError> {
        let mut labels = self.downloaded_labels();
        if labels.iter().any(|id| id == order_id) {
            return Ok(false);
        }
        labels.push(order_id.to_string());
        let json = serde_json::Value::from(labels).to_string();
        self.local.set(keys::DOWNLOADED_LABELS, &json)?;
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn signed_in_both() -> Session {
        let session = Session::in_memory("/admin");
        session
            .store_login(Role::User, "user-token", &serde_json::json!({"name": "Asha"}))
            .unwrap();
        session
            .store_login(Role::Admin, "admin-token", &serde_json::json!({"name": "Ops"}))
            .unwrap();
        session
    }

    #[test]
    fn test_admin_path_matching() {
        let session = Session::in_memory("/admin");
        assert!(session.is_admin_path("/admin"));
        assert!(session.is_admin_path("/admin/orders/1"));
        assert!(session.is_admin_path("/admin?page=2"));
        assert!(!session.is_admin_path("/administrator"));
        assert!(!session.is_admin_path("/user/admin"));
    }

    #[test]
    fn test_admin_path_prefers_admin_token() {
        let session = signed_in_both();
        let (role, token) = session.select_token("/admin/orders").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(token.expose_secret(), "admin-token");

        let (role, token) = session.select_token("/user/cart").unwrap();
        assert_eq!(role, Role::User);
        assert_eq!(token.expose_secret(), "user-token");
    }

    #[test]
    fn test_admin_path_falls_back_to_user_token() {
        let session = Session::in_memory("/admin");
        session
            .store_login(Role::User, "user-token", &serde_json::json!({}))
            .unwrap();
        let (role, _) = session.select_token("/admin/orders").unwrap();
        assert_eq!(role, Role::User);

        assert!(Session::in_memory("/admin").select_token("/user/cart").is_none());
    }

    #[test]
    fn test_invalidate_all_clears_both_stores() {
        let session = signed_in_both();
        session.session().set("draft", "x").unwrap();
        session.mark_label_downloaded("o1").unwrap();

        let removed = session.invalidate(InvalidationScope::All, "/user/cart").unwrap();
        assert_eq!(removed, 6);
        assert!(session.local().keys().is_empty());
        assert!(session.session().keys().is_empty());
    }

    #[test]
    fn test_invalidate_role_keeps_other_role() {
        let session = signed_in_both();
        session.invalidate(InvalidationScope::Role, "/admin/orders").unwrap();
        assert!(!session.is_signed_in(Role::Admin));
        assert!(session.is_signed_in(Role::User));
        assert!(session.record::<serde_json::Value>(Role::User).is_some());
    }

    #[test]
    fn test_downloaded_labels_are_deduplicated() {
        let session = Session::in_memory("/admin");
        assert!(session.mark_label_downloaded("o1").unwrap());
        assert!(session.mark_label_downloaded("o2").unwrap());
        assert!(!session.mark_label_downloaded("o1").unwrap());
        assert_eq!(session.downloaded_labels(), vec!["o1", "o2"]);
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!("ROLE".parse::<InvalidationScope>().unwrap(), InvalidationScope::Role);
        assert!("everything".parse::<InvalidationScope>().is_err());
    }
}
