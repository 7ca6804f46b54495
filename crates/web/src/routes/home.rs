//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user: CurrentUser,
    pub active_nav: &'static str,
}

/// Display the home page with a greeting and quick links.
pub async fn home(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    HomeTemplate {
        user,
        active_nav: "home",
    }
}
