//! Role selection and admin login route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::SignedCookieJar;
use model_showcase_core::Role;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{clear_session, set_role as store_role};
use crate::services::AuthService;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate;

// =============================================================================
// Handlers
// =============================================================================

/// Handle a role choice from the home page.
///
/// `user` is granted immediately, `admin` needs the login form, and anything
/// else goes back home.
pub async fn set_role(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(role): Path<String>,
) -> (SignedCookieJar, Redirect) {
    match role.as_str() {
        "user" => {
            let jar = store_role(jar, Role::User, state.config().secure_cookies);
            tracing::info!("User role selected");
            (jar, Redirect::to("/products"))
        }
        "admin" => (jar, Redirect::to("/login")),
        _ => (jar, Redirect::to("/")),
    }
}

/// Display the admin login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate
}

/// Handle admin login form submission.
///
/// A failed attempt answers with a plain-text error and leaves the role
/// cookie as it was. A form missing either field is a bad request.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: std::result::Result<Form<LoginForm>, FormRejection>,
) -> Result<(SignedCookieJar, Redirect)> {
    let Form(form) = form.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let role = AuthService::new(&state.config().admin).login_admin(&form.username, &form.password)?;
    let jar = store_role(jar, role, state.config().secure_cookies);
    Ok((jar, Redirect::to("/products")))
}

/// Clear the role cookie and return home.
pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    tracing::info!("Session cleared");
    (clear_session(jar), Redirect::to("/"))
}
