//! Identity service API client.
//!
//! The identity service owns accounts: login, registration, and profile
//! resolution all happen over HTTP. Successful responses use a
//! `{success, data}` envelope; failures carry an `{error}` payload.
//!
//! # Endpoints
//!
//! - `POST /auth/login` with `{email, password}`
//! - `POST /auth/register` with `{email, name, password}`
//! - `GET /auth/profile` with `Authorization: Bearer <token>`
//!
//! # Example
//!
//! ```rust,ignore
//! use reflecta_web::identity::IdentityClient;
//!
//! let client = IdentityClient::new(&config.api)?;
//! let payload = client.login("a@b.com", "secret").await?;
//! let profile = client.profile(&payload.token).await?;
//! ```

mod types;

pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use thiserror::Error;

use crate::config::IdentityApiConfig;

/// Errors that can occur when talking to the identity service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection refused, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service rejected the request with an error payload.
    #[error("{0}")]
    Rejected(String),

    /// The response did not match the documented envelope.
    #[error("unexpected response: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Whether this is a rejection the user can correct (bad credentials,
    /// duplicate email), as opposed to a connectivity or protocol failure.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Envelope
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

/// Decode a response body against the `{success, data}` / `{error}` envelope.
fn decode_envelope<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<T, ApiError> {
    if !status.is_success() {
        // Error responses carry {error: message}; anything else is a protocol
        // mismatch worth surfacing with the status code.
        if let Ok(envelope) = serde_json::from_slice::<ApiEnvelope<T>>(bytes)
            && let Some(message) = envelope.error
        {
            return Err(ApiError::Rejected(message));
        }
        return Err(ApiError::Unexpected(format!(
            "service responded with status {status}"
        )));
    }

    let envelope: ApiEnvelope<T> = serde_json::from_slice(bytes)?;
    if let Some(message) = envelope.error {
        return Err(ApiError::Rejected(message));
    }
    if !envelope.success {
        return Err(ApiError::Unexpected(
            "success flag unset without an error message".to_string(),
        ));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Unexpected("no data in response".to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Identity Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the identity API.
///
/// Cheaply cloneable; holds a pooled `reqwest` client with an explicit
/// request timeout so a hung identity service cannot stall requests
/// indefinitely.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a new identity API client.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client cannot be constructed.
    pub fn new(config: &IdentityApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            inner: Arc::new(IdentityClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_owned(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Exchange credentials for a token and profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when the service refuses the credentials
    /// and `ApiError::Http` on connectivity failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        decode_envelope(response.status(), &response.bytes().await?)
    }

    /// Create an account and receive an authenticated session directly.
    ///
    /// # Errors
    ///
    /// Same contract as [`login`](Self::login).
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AuthPayload, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url("/auth/register"))
            .json(&json!({ "email": email, "name": name, "password": password }))
            .send()
            .await?;

        decode_envelope(response.status(), &response.bytes().await?)
    }

    /// Resolve a stored token to the account it belongs to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` for expired or invalid tokens and
    /// `ApiError::Http` on connectivity failures.
    pub async fn profile(&self, token: &str) -> Result<Profile, ApiError> {
        let response = self
            .inner
            .client
            .get(self.url("/auth/profile"))
            .bearer_auth(token)
            .send()
            .await?;

        decode_envelope(response.status(), &response.bytes().await?)
    }
}
