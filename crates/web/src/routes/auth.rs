//! Authentication route handlers.
//!
//! Login, registration, and logout against the external identity service.
//! Failures from the session service are turned into redirect query codes;
//! the templates translate those into user-facing messages. Session-store
//! failures are the only hard errors.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::services::SessionError;
use crate::state::AppState;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

/// Translate a login error query code into a user-facing message.
fn login_error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid email or password.",
        "connection" => "Could not reach the server. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

/// Translate a login success query code into a user-facing message.
fn login_success_message(code: &str) -> Option<String> {
    match code {
        "logged_out" => Some("You have been logged out.".to_string()),
        _ => None,
    }
}

/// Translate a register error query code into a user-facing message.
fn register_error_message(code: &str) -> String {
    match code {
        "password_mismatch" => "Passwords do not match.".to_string(),
        "password_too_short" => {
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters.")
        }
        "email_taken" => "An account with this email already exists.".to_string(),
        "rejected" => "Registration was rejected. Check your details and try again.".to_string(),
        "connection" => "Could not reach the server. Please try again.".to_string(),
        _ => "Something went wrong. Please try again.".to_string(),
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// Visitors who are already logged in are sent to the home page instead.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        error: query.error.as_deref().map(login_error_message),
        success: query.success.as_deref().and_then(login_success_message),
    }
    .into_response()
}

/// Handle login form submission.
///
/// Exchanges credentials at the identity service and persists the session.
/// Rejections and connectivity failures redirect back with a message code;
/// only session-store failures bubble up as errors.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state
        .sessions()
        .login(&session, &form.email, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user = %user.id, "login");
            Ok(Redirect::to("/").into_response())
        }
        Err(SessionError::Store(err)) => Err(SessionError::Store(err).into()),
        Err(err) if err.is_credential_rejection() => {
            tracing::warn!(error = %err, "login rejected");
            Ok(Redirect::to("/login?error=credentials").into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "login failed");
            Ok(Redirect::to("/login?error=connection").into_response())
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
///
/// Visitors who are already logged in are sent to the home page instead.
pub async fn register_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    RegisterTemplate {
        error: query.error.as_deref().map(register_error_message),
    }
    .into_response()
}

/// Handle registration form submission.
///
/// Creates the account at the identity service; on success the visitor is
/// logged in directly, no separate confirmation step.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    // Validate passwords match
    if form.password != form.password_confirm {
        return Ok(Redirect::to("/register?error=password_mismatch").into_response());
    }

    // Validate password length
    if form.password.len() < MIN_PASSWORD_LENGTH {
        return Ok(Redirect::to("/register?error=password_too_short").into_response());
    }

    match state
        .sessions()
        .register(&session, &form.email, &form.name, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user = %user.id, "account registered");
            Ok(Redirect::to("/").into_response())
        }
        Err(SessionError::Store(err)) => Err(SessionError::Store(err).into()),
        Err(err) if err.is_credential_rejection() => {
            tracing::warn!(error = %err, "registration rejected");
            // Check for specific error types
            let message = err.to_string();
            if message.contains("taken") || message.contains("already") {
                Ok(Redirect::to("/register?error=email_taken").into_response())
            } else {
                Ok(Redirect::to("/register?error=rejected").into_response())
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "registration failed");
            Ok(Redirect::to("/register?error=connection").into_response())
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the persisted token and the cached profile. Safe to call when
/// already logged out.
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Response> {
    state.sessions().logout(&session).await?;
    Ok(Redirect::to("/login?success=logged_out").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_messages() {
        assert_eq!(login_error_message("credentials"), "Invalid email or password.");
        assert!(login_error_message("connection").contains("reach the server"));
        assert!(login_error_message("garbage").contains("went wrong"));
    }

    #[test]
    fn test_login_success_messages() {
        assert!(login_success_message("logged_out").is_some());
        assert!(login_success_message("garbage").is_none());
    }

    #[test]
    fn test_register_error_messages() {
        assert_eq!(register_error_message("password_mismatch"), "Passwords do not match.");
        assert!(register_error_message("password_too_short").contains('8'));
        assert!(register_error_message("email_taken").contains("already exists"));
    }
}
