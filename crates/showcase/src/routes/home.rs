//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use model_showcase_core::Role;

use crate::filters;
use crate::middleware::CurrentRole;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub role: Role,
}

/// Display the home page.
///
/// Not gated. Offers the two role choices, or a way back to the listing when
/// a role is already set.
pub async fn index(CurrentRole(role): CurrentRole) -> impl IntoResponse {
    HomeTemplate { role }
}
