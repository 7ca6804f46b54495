//! Authentication session lifecycle.
//!
//! Single source of truth for who is logged in. The session persists exactly
//! one key - the raw identity token - while the resolved profile lives in an
//! in-process cache keyed by that token. A restart therefore keeps the token
//! (the session store is durable) but drops the profiles, and the next
//! request re-resolves the token against the identity service.
//!
//! # Invariants
//!
//! - A profile is only ever reachable through the token it was resolved from.
//! - At most one profile resolution is in flight per token value: concurrent
//!   lookups for the same token coalesce onto one identity call.
//! - Replacing the token (a fresh login) changes the cache key, so a stale
//!   in-flight resolution for the old token can never surface under the new
//!   one.
//!
//! # Failure handling
//!
//! Login and register failures propagate to the caller so the presenting view
//! controls feedback. Hydration failures do not: a token that no longer
//! resolves is expected lifecycle (expiry, revocation), so it is logged,
//! the token is removed, and the session quietly becomes unauthenticated.

mod error;

pub use error::SessionError;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tower_sessions::Session;

use crate::identity::{AuthPayload, IdentityClient};
use crate::models::{CurrentUser, session_keys};

/// Upper bound on cached profiles.
const PROFILE_CACHE_CAPACITY: u64 = 10_000;

/// How long a resolved profile is trusted before re-resolving (5 minutes).
const PROFILE_CACHE_TTL: Duration = Duration::from_secs(300);

/// Authentication session service.
///
/// Cheaply cloneable; injected into handlers and extractors via
/// [`AppState`](crate::state::AppState).
#[derive(Clone)]
pub struct SessionService {
    inner: Arc<SessionServiceInner>,
}

struct SessionServiceInner {
    identity: IdentityClient,
    /// Resolved profiles, keyed by the token they were resolved from.
    profiles: Cache<String, CurrentUser>,
}

impl SessionService {
    /// Create a new session service backed by the given identity client.
    #[must_use]
    pub fn new(identity: IdentityClient) -> Self {
        let profiles = Cache::builder()
            .max_capacity(PROFILE_CACHE_CAPACITY)
            .time_to_live(PROFILE_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(SessionServiceInner { identity, profiles }),
        }
    }

    /// Exchange credentials for an authenticated session.
    ///
    /// On success the token is persisted and the profile cached in one step;
    /// on failure the previous session state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Identity` when the identity service rejects the
    /// credentials or is unreachable, `SessionError::Store` if persisting the
    /// token fails.
    pub async fn login(
        &self,
        session: &Session,
        email: &str,
        password: &str,
    ) -> Result<CurrentUser, SessionError> {
        let payload = self.inner.identity.login(email, password).await?;
        self.establish(session, payload).await
    }

    /// Create an account and establish an authenticated session directly.
    ///
    /// # Errors
    ///
    /// Same contract as [`login`](Self::login).
    pub async fn register(
        &self,
        session: &Session,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<CurrentUser, SessionError> {
        let payload = self.inner.identity.register(email, name, password).await?;
        self.establish(session, payload).await
    }

    /// Clear the session: token gone, cached profile gone.
    ///
    /// Safe to call when already logged out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the session store cannot be updated.
    pub async fn logout(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(token) = session
            .remove::<String>(session_keys::AUTH_TOKEN)
            .await?
        {
            self.inner.profiles.invalidate(&token).await;
        }
        session.flush().await?;
        Ok(())
    }

    /// The resolved user behind this session, hydrating from the persisted
    /// token if needed.
    ///
    /// Returns `None` when no token is stored or the stored token no longer
    /// resolves; in the latter case the dead token is removed so subsequent
    /// requests skip the identity call.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the session store cannot be read or
    /// updated. Resolution failures are not errors here.
    pub async fn current_user(
        &self,
        session: &Session,
    ) -> Result<Option<CurrentUser>, SessionError> {
        let Some(token) = session.get::<String>(session_keys::AUTH_TOKEN).await? else {
            return Ok(None);
        };

        match self.resolve(token).await {
            Ok(user) => Ok(Some(user)),
            Err(error) => {
                tracing::warn!(error = %error, "stored token no longer resolves, clearing session");
                session.remove::<String>(session_keys::AUTH_TOKEN).await?;
                Ok(None)
            }
        }
    }

    /// Whether this session belongs to a resolved user.
    ///
    /// # Errors
    ///
    /// Same contract as [`current_user`](Self::current_user).
    pub async fn is_authenticated(&self, session: &Session) -> Result<bool, SessionError> {
        Ok(self.current_user(session).await?.is_some())
    }

    /// Persist the token and cache its profile as one step.
    async fn establish(
        &self,
        session: &Session,
        payload: AuthPayload,
    ) -> Result<CurrentUser, SessionError> {
        let user = CurrentUser::try_from(payload.user)?;
        session
            .insert(session_keys::AUTH_TOKEN, &payload.token)
            .await?;
        self.inner.profiles.insert(payload.token, user.clone()).await;
        Ok(user)
    }

    /// Resolve a token to its profile, coalescing concurrent calls for the
    /// same token onto a single identity request.
    async fn resolve(&self, token: String) -> Result<CurrentUser, Arc<SessionError>> {
        let identity = self.inner.identity.clone();
        let key = token.clone();
        self.inner
            .profiles
            .try_get_with(key, async move {
                let profile = identity.profile(&token).await?;
                CurrentUser::try_from(profile).map_err(SessionError::from)
            })
            .await
    }
}
