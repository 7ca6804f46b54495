//! Wire types for the identity API.
//!
//! These mirror the JSON the service returns; domain conversions live in
//! `models`.

use serde::Deserialize;

/// Payload returned by the login and register exchanges.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    /// The authenticated account.
    pub user: Profile,
    /// Opaque bearer token for subsequent calls.
    pub token: String,
}

/// Account profile as the identity service reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    /// Stable account identifier.
    pub id: String,
    /// Account email, unique per account.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}
