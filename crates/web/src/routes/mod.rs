//! HTTP route handlers for the web front-end.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check (in main)
//! GET  /health/ready           - Readiness check (in main)
//!
//! # Auth (public)
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! POST /logout                 - Logout action
//!
//! # Protected (behind RequireAuth)
//! GET  /                       - Home page
//! GET  /entries                - Entry list with search/tag/sort
//!
//! # Fallback
//! *                            - Not-found page
//! ```

pub mod auth;
pub mod entries;
pub mod home;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the auth routes router.
///
/// These are the only public pages; the binary wraps them in the auth rate
/// limiter.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the protected routes router.
///
/// Every handler in here takes `RequireAuth`, so unauthenticated visitors
/// are redirected to the login page.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/entries", get(entries::index))
}

/// Unknown paths render the not-found view.
pub async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Create all routes for the web front-end.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(protected_routes())
        .merge(auth_routes())
        .fallback(fallback)
}
