//! Role gate extractors.
//!
//! The role cookie holds at most one [`Role`]. Gated pages take
//! [`RequireRole`], which sends visitors without a role back to the home page.
//! Pages that only display the role take [`CurrentRole`].

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::Key;
use model_showcase_core::Role;

use super::session::{removal_cookie, role_cookie, role_from_jar};

/// Extractor that requires a role to have been chosen.
///
/// If the visitor has no role, returns a redirect to the home page.
///
/// # Example
///
/// ```rust,ignore
/// async fn gated_handler(RequireRole(role): RequireRole) -> impl IntoResponse {
///     format!("Signed in as {role}")
/// }
/// ```
pub struct RequireRole(pub Role);

/// Error returned when a gated page is requested without a role.
pub struct RoleRejection;

impl IntoResponse for RoleRejection {
    fn into_response(self) -> Response {
        Redirect::to("/").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireRole
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = RoleRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match role_from_parts(parts, state) {
            Role::Unauthenticated => Err(RoleRejection),
            role @ (Role::User | Role::Admin) => Ok(Self(role)),
        }
    }
}

/// Extractor that reads the current role without rejecting.
pub struct CurrentRole(pub Role);

impl<S> FromRequestParts<S> for CurrentRole
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(role_from_parts(parts, state)))
    }
}

fn role_from_parts<S>(parts: &Parts, state: &S) -> Role
where
    Key: FromRef<S>,
{
    let jar = SignedCookieJar::from_headers(&parts.headers, Key::from_ref(state));
    role_from_jar(&jar)
}

/// Helper to store a role in the cookie jar.
///
/// [`Role::Unauthenticated`] removes the cookie instead.
#[must_use]
pub fn set_role(jar: SignedCookieJar, role: Role, secure: bool) -> SignedCookieJar {
    if role.is_authenticated() {
        jar.add(role_cookie(role, secure))
    } else {
        clear_session(jar)
    }
}

/// Helper to clear the role (logout).
#[must_use]
pub fn clear_session(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(removal_cookie())
}
