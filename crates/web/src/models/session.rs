//! Session-related constants.
//!
//! The session persists exactly one piece of authentication state: the raw
//! identity token. An absent key means "no session". The resolved profile is
//! never persisted; it lives in the in-process cache and is re-resolved from
//! the token after a restart.

/// Session keys for authentication data.
pub mod keys {
    /// Key for the raw identity token.
    pub const AUTH_TOKEN: &str = "auth.token";
}
