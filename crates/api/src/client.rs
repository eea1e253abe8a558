//! The shared HTTP client.
//!
//! One [`ApiClient`] is created at startup and cloned into every state
//! container. Each request passes through two interceptors:
//!
//! - **request**: attaches the bearer token chosen by
//!   [`Session::select_token`], tags the request with an `x-request-id`,
//!   and encodes the body as JSON or multipart;
//! - **response**: a 401 invalidates the session once and surfaces as
//!   [`ApiError::Unauthorized`]; any other non-2xx becomes
//!   [`ApiError::Api`] carrying the backend message if one was sent.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shopdesk_core::Envelope;
use tracing::{debug, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::payload::Payload;
use crate::retry::RetryPolicy;
use crate::session::{InvalidationScope, Session};
use crate::storage::{FileStore, MemoryStore};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Client for the Shopdesk backend.
///
/// Cheap to clone; clones share the connection pool and session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
    retry: RetryPolicy,
    unauthorized_scope: InvalidationScope,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("retry", &self.inner.retry)
            .field("unauthorized_scope", &self.inner.unauthorized_scope)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client over an existing session.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("shopdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.clone(),
                session,
                retry: config.retry.clone(),
                unauthorized_scope: config.unauthorized_scope,
            }),
        })
    }

    /// Create a client whose local storage is the file at
    /// `config.state_path` and whose session storage is in memory.
    ///
    /// # Errors
    ///
    /// Returns error if the state file is unreadable or the HTTP client
    /// fails to build.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let local = FileStore::open(&config.state_path)?;
        let session = Session::new(
            Arc::new(local),
            Arc::new(MemoryStore::new()),
            config.admin_prefix.clone(),
        );
        Self::new(config, session)
    }

    /// The session tokens are read from.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Absolute URL for `path` with `query` appended.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Url` if the result is not a valid URL.
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>> {
        self.send(Method::GET, path, &[], &Payload::Empty).await
    }

    /// `GET path?query`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>> {
        self.send(Method::GET, path, query, &Payload::Empty).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>> {
        self.send(Method::POST, path, &[], &Payload::json(body)?).await
    }

    /// `POST path` with a prepared body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn post_payload<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &Payload,
    ) -> Result<Envelope<T>> {
        self.send(Method::POST, path, &[], payload).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>> {
        self.send(Method::PUT, path, &[], &Payload::json(body)?).await
    }

    /// `PUT path` with a prepared body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn put_payload<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &Payload,
    ) -> Result<Envelope<T>> {
        self.send(Method::PUT, path, &[], payload).await
    }

    /// `PATCH path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>> {
        self.send(Method::PATCH, path, &[], &Payload::json(body)?).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>> {
        self.send(Method::DELETE, path, &[], &Payload::Empty).await
    }

    /// `GET path` returning the raw body (shipping labels).
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    #[instrument(skip(self), fields(request_id))]
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let url = &self.url(path, &[])?;
        let (method, payload) = (&Method::GET, &Payload::Empty);
        let response = self
            .with_retry(|| self.execute(method, path, url, payload))
            .await?;
        let bytes = response.bytes().await?;
        debug!(len = bytes.len(), "binary response");
        Ok(bytes.to_vec())
    }

    // =========================================================================
    // Interceptors
    // =========================================================================

    /// Send a request and decode the envelope.
    #[instrument(skip(self, method, query, payload), fields(%method, request_id))]
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: &Payload,
    ) -> Result<Envelope<T>> {
        let url = &self.url(path, query)?;
        let method = &method;
        let response = self
            .with_retry(|| self.execute(method, path, url, payload))
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), len = body.len(), "response");

        if body.trim().is_empty() {
            return Ok(Envelope::empty());
        }
        serde_json::from_str(&body)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))
    }

    async fn with_retry<F, Fut>(&self, mut attempt_fn: F) -> Result<Response>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<Response>>,
    {
        let policy = &self.inner.retry;
        let mut attempt = 0;
        loop {
            match attempt_fn().await {
                Ok(response) => return Ok(response),
                Err(err) if policy.should_retry(&err, attempt) => {
                    let delay = policy.backoff.delay_for_attempt(attempt);
                    warn!(attempt = attempt + 1, ?delay, error = %err, "retrying request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One attempt: request interceptor, send, response interceptor.
    async fn execute(
        &self,
        method: &Method,
        path: &str,
        url: &Url,
        payload: &Payload,
    ) -> Result<Response> {
        let request_id = Uuid::new_v4();
        tracing::Span::current().record("request_id", tracing::field::display(request_id));

        let mut request = self
            .inner
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(REQUEST_ID_HEADER, request_id.to_string());

        if let Some((role, token)) = self.inner.session.select_token(path) {
            debug!(%role, "attaching bearer token");
            request = request.bearer_auth(token.expose_secret());
        }

        request = match payload {
            Payload::Empty => request,
            Payload::Json(value) => request.json(value),
            Payload::Multipart(body) => request.multipart(body.to_form()?),
        };

        debug!(%url, multipart = payload.is_multipart(), "request");
        let response = request.send().await?;
        self.intercept(path, response).await
    }

    async fn intercept(&self, path: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(response).await;

        if status == StatusCode::UNAUTHORIZED {
            match self
                .inner
                .session
                .invalidate(self.inner.unauthorized_scope, path)
            {
                Ok(removed) => warn!(
                    path,
                    removed,
                    scope = ?self.inner.unauthorized_scope,
                    "unauthorized, session cleared"
                ),
                Err(err) => warn!(path, error = %err, "unauthorized, session clear failed"),
            }
            return Err(ApiError::Unauthorized { message });
        }

        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Backend message from an error body, if it is an envelope.
async fn error_message(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    serde_json::from_str::<Envelope<serde_json::Value>>(&body)
        .ok()
        .and_then(|envelope| envelope.message)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let config = ApiConfig::new(Url::parse(base).unwrap());
        ApiClient::new(&config, Session::in_memory("/admin")).unwrap()
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let first = client("http://localhost:5000/api/");
        assert_eq!(
            first.url("/admin/orders", &[]).unwrap().as_str(),
            "http://localhost:5000/api/admin/orders"
        );

        let client = client("http://localhost:5000/api");
        assert_eq!(
            client.url("/user/products", &[]).unwrap().as_str(),
            "http://localhost:5000/api/user/products"
        );
    }

    #[test]
    fn test_url_encodes_query() {
        let client = client("https://api.example.com");
        let url = client
            .url(
                "/user/products",
                &[("search", "linen shirt".to_string()), ("page", "2".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/user/products?search=linen+shirt&page=2"
        );
    }
}
