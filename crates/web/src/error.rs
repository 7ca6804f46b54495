//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding to the client. Route handlers that can fail
//! return `Result<T, AppError>`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::filters;
use crate::services::SessionError;

/// Application-level error type for the web front-end.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session operation failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Not-found page template, also used for the router fallback.
#[derive(Template, WebTemplate)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Session(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        match &self {
            Self::Session(err) => {
                // Don't expose internal error details to clients
                let (status, message) = match err {
                    SessionError::Identity(_) => {
                        (StatusCode::BAD_GATEWAY, "External service error")
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
                };
                (status, message).into_response()
            }
            Self::NotFound(_) => {
                (StatusCode::NOT_FOUND, NotFoundTemplate).into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::identity::ApiError;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("/entries/999".to_string());
        assert_eq!(err.to_string(), "Not found: /entries/999");
    }

    #[test]
    fn test_not_found_status_and_body() {
        let response = AppError::NotFound("/nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_identity_failure_maps_to_bad_gateway() {
        let err = AppError::Session(SessionError::Identity(ApiError::Unexpected(
            "boom".to_string(),
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_found_template_renders() {
        let page = NotFoundTemplate.render().unwrap();
        assert!(page.contains("404"));
        assert!(page.contains("Back to home"));
    }
}
