//! Account records: shoppers, their addresses, admins, delivery drivers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::types::{AccountStatus, AddressId, AdminId, AdminRole, DriverId, UserId};

/// An end-user (shopper) account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A saved shipping address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(alias = "_id")]
    pub id: AddressId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Address {
    /// Single-line rendering for tables.
    #[must_use]
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.line1.as_str()];
        if let Some(line2) = self.line2.as_deref() {
            parts.push(line2);
        }
        parts.push(self.city.as_str());
        if let Some(state) = self.state.as_deref() {
            parts.push(state);
        }
        parts.push(self.postal_code.as_str());
        parts.join(", ")
    }
}

/// An administrator account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(alias = "_id")]
    pub id: AdminId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: AdminRole,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A delivery driver orders can be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(alias = "_id")]
    pub id: DriverId,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Login form body, shared by shoppers and admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration form body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Profile edit body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Fields submitted when saving an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub is_default: bool,
}

/// Fields submitted when creating an admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminDraft {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: AdminRole,
}

/// Fields submitted when creating or editing a driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDraft {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// Token plus account returned by a successful login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginGrant<A> {
    pub token: String,
    #[serde(alias = "admin")]
    pub user: A,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_address_one_line() {
        let address: Address = serde_json::from_str(
            r#"{"_id":"a1","line1":"12 Hill Rd","city":"Pune","state":"MH","postalCode":"411001"}"#,
        )
        .unwrap();
        assert_eq!(address.one_line(), "12 Hill Rd, Pune, MH, 411001");
        assert!(!address.is_default);
    }

    #[test]
    fn test_login_grant_accepts_admin_key() {
        let grant: LoginGrant<Admin> = serde_json::from_str(
            r#"{"token":"t","admin":{"_id":"ad1","name":"Ops","email":"ops@shop.test","role":"super_admin"}}"#,
        )
        .unwrap();
        assert_eq!(grant.user.role, AdminRole::SuperAdmin);
    }
}
