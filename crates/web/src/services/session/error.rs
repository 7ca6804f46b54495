//! Session service error types.

use thiserror::Error;

use crate::identity::ApiError;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The identity service refused the request or was unreachable.
    #[error("identity service error: {0}")]
    Identity(#[from] ApiError),

    /// The identity service returned a profile we could not validate.
    #[error("invalid profile: {0}")]
    InvalidProfile(#[from] reflecta_core::EmailError),

    /// Reading or writing the session store failed.
    #[error("session store error: {0}")]
    Store(#[from] tower_sessions::session::Error),
}

impl SessionError {
    /// Whether the failure is a rejection the user can correct (wrong
    /// password, duplicate email), as opposed to a connectivity or internal
    /// failure.
    #[must_use]
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, Self::Identity(api) if api.is_rejection())
    }
}
