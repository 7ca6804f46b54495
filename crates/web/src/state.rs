//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;
use url::Url;

use crate::config::AppConfig;
use crate::identity::IdentityClient;
use crate::services::SessionService;

/// Error creating application state.
///
/// Configuration problems are reported here, at construction time, rather
/// than surfacing as failures deep inside a request.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid identity API base URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the session service and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    sessions: SessionService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration
    /// * `pool` - `PostgreSQL` connection pool (session storage)
    ///
    /// # Errors
    ///
    /// Returns an error if the identity API base URL is not a valid URL or
    /// the HTTP client cannot be constructed.
    pub fn new(config: AppConfig, pool: PgPool) -> Result<Self, StateError> {
        Url::parse(&config.api.base_url)?;

        let identity = IdentityClient::new(&config.api)?;
        let sessions = SessionService::new(identity);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                sessions,
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the session service.
    #[must_use]
    pub fn sessions(&self) -> &SessionService {
        &self.inner.sessions
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::IdentityApiConfig;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;

    fn config(api_base_url: &str) -> AppConfig {
        AppConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            api: IdentityApiConfig {
                base_url: api_base_url.to_string(),
                timeout_secs: 10,
            },
            sentry_dsn: None,
        }
    }

    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://localhost/test")
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_api_url() {
        let result = AppState::new(config("not a url"), lazy_pool());
        assert!(matches!(result, Err(StateError::InvalidApiUrl(_))));
    }

    #[tokio::test]
    async fn test_new_accepts_valid_config() {
        let state = AppState::new(config("http://localhost:5000/api"), lazy_pool()).unwrap();
        assert_eq!(state.config().port, 3000);
    }
}
