//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPDESK_API_URL` - Base URL of the backend (e.g., `https://api.example.com/api`)
//!
//! ## Optional
//! - `SHOPDESK_API_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `SHOPDESK_ADMIN_PREFIX` - Path prefix of admin routes (default: /admin)
//! - `SHOPDESK_STATE_PATH` - Persisted local storage file (default: .shopdesk/local-storage.json)
//! - `SHOPDESK_RETRY_ATTEMPTS` - Retries for transient failures (default: 0)
//! - `SHOPDESK_RETRY_BASE_MS` - First retry delay (default: 200)
//! - `SHOPDESK_RETRY_MAX_MS` - Retry delay ceiling (default: 2000)
//! - `SHOPDESK_UNAUTHORIZED_SCOPE` - `all` or `role`: what a 401 clears (default: all)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::retry::{Backoff, RetryPolicy};
use crate::session::InvalidationScope;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ADMIN_PREFIX: &str = "/admin";
const DEFAULT_STATE_PATH: &str = ".shopdesk/local-storage.json";
const DEFAULT_RETRY_BASE_MS: u64 = 200;
const DEFAULT_RETRY_MAX_MS: u64 = 2000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Settings shared by every request.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL; endpoint paths are appended to it
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// Paths starting with this prefix carry the admin token
    pub admin_prefix: String,
    /// File backing persisted local storage
    pub state_path: PathBuf,
    /// Retry policy for transient failures
    pub retry: RetryPolicy,
    /// What a 401 response clears
    pub unauthorized_scope: InvalidationScope,
}

impl ApiConfig {
    /// Configuration with defaults for everything but the base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            admin_prefix: DEFAULT_ADMIN_PREFIX.to_string(),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            retry: RetryPolicy::none(),
            unauthorized_scope: InvalidationScope::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SHOPDESK_API_URL` is missing or any
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ApiConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("SHOPDESK_API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOPDESK_API_URL".to_string()))?;
        let base_url = Url::parse(raw_url.trim()).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPDESK_API_URL".to_string(), e.to_string())
        })?;

        let mut config = Self::new(base_url);
        config.timeout = Duration::from_secs(parse_or(
            &lookup,
            "SHOPDESK_API_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);

        if let Some(prefix) = lookup("SHOPDESK_ADMIN_PREFIX") {
            config.admin_prefix = normalize_prefix(&prefix).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "SHOPDESK_ADMIN_PREFIX".to_string(),
                    "must not be empty".to_string(),
                )
            })?;
        }
        if let Some(path) = lookup("SHOPDESK_STATE_PATH").filter(|v| !v.trim().is_empty()) {
            config.state_path = PathBuf::from(path);
        }

        let attempts: u32 = parse_or(&lookup, "SHOPDESK_RETRY_ATTEMPTS", 0)?;
        let base_ms = parse_or(&lookup, "SHOPDESK_RETRY_BASE_MS", DEFAULT_RETRY_BASE_MS)?;
        let max_ms = parse_or(&lookup, "SHOPDESK_RETRY_MAX_MS", DEFAULT_RETRY_MAX_MS)?;
        config.retry = RetryPolicy::new(attempts).with_backoff(Backoff::Exponential {
            base: Duration::from_millis(base_ms),
            max: Duration::from_millis(max_ms.max(base_ms)),
        });

        config.unauthorized_scope = parse_or(
            &lookup,
            "SHOPDESK_UNAUTHORIZED_SCOPE",
            InvalidationScope::default(),
        )?;

        Ok(config)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        _ => Ok(default),
    }
}

/// `admin/` and `/admin` both become `/admin`.
fn normalize_prefix(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("/{trimmed}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_base_url() {
        let err = ApiConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "SHOPDESK_API_URL"));
    }

    #[test]
    fn test_defaults() {
        let config =
            ApiConfig::from_lookup(lookup(&[("SHOPDESK_API_URL", "http://localhost:5000/api")]))
                .unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:5000/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.admin_prefix, "/admin");
        assert_eq!(config.retry.max_retries, 0);
        assert_eq!(config.unauthorized_scope, InvalidationScope::All);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("SHOPDESK_API_URL", "https://api.example.com"),
            ("SHOPDESK_API_TIMEOUT_SECS", "5"),
            ("SHOPDESK_ADMIN_PREFIX", "backoffice/"),
            ("SHOPDESK_RETRY_ATTEMPTS", "3"),
            ("SHOPDESK_UNAUTHORIZED_SCOPE", "role"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.admin_prefix, "/backoffice");
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.unauthorized_scope, InvalidationScope::Role);
    }

    #[test]
    fn test_invalid_values() {
        let err = ApiConfig::from_lookup(lookup(&[
            ("SHOPDESK_API_URL", "http://localhost"),
            ("SHOPDESK_API_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "SHOPDESK_API_TIMEOUT_SECS"));

        let err = ApiConfig::from_lookup(lookup(&[("SHOPDESK_API_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));
    }
}
