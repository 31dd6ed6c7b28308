//! Role cookie.
//!
//! The visitor's role travels in a single cookie, `showcase_session`, signed
//! with a key derived from the session secret. Nothing is kept server-side:
//! any instance started with the same secret accepts the cookie, and changing
//! the secret invalidates every outstanding one.

use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use model_showcase_core::Role;
use sha2::{Digest, Sha512};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "showcase_session";

/// Derive the 64-byte cookie signing key from the session secret.
#[must_use]
pub fn signing_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}

/// Cookie carrying `role`. It lasts until the browser session ends.
#[must_use]
pub fn role_cookie(role: Role, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, role.label()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie used to expire the role cookie. Path must match [`role_cookie`].
#[must_use]
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE_NAME).path("/").build()
}

/// Role carried by `jar`.
///
/// A missing cookie, a bad signature, and an unknown value all read as
/// [`Role::Unauthenticated`].
#[must_use]
pub fn role_from_jar(jar: &SignedCookieJar) -> Role {
    jar.get(SESSION_COOKIE_NAME)
        .and_then(|cookie| Role::from_label(cookie.value()))
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header::COOKIE};

    use super::*;

    #[test]
    fn test_signing_key_is_deterministic() {
        assert_eq!(
            signing_key("supersecretkey").master(),
            signing_key("supersecretkey").master()
        );
    }

    #[test]
    fn test_signing_key_depends_on_secret() {
        assert_ne!(signing_key("a").master(), signing_key("b").master());
    }

    #[test]
    fn test_role_cookie_attributes() {
        let cookie = role_cookie(Role::Admin, false);

        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "admin");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), None);
    }

    #[test]
    fn test_signed_role_is_read_back() {
        let jar = SignedCookieJar::new(signing_key("secret")).add(role_cookie(Role::User, false));

        assert_eq!(role_from_jar(&jar), Role::User);
    }

    #[test]
    fn test_unsigned_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("showcase_session=admin"));

        let jar = SignedCookieJar::from_headers(&headers, signing_key("secret"));

        assert_eq!(role_from_jar(&jar), Role::Unauthenticated);
    }

    #[test]
    fn test_empty_jar_is_unauthenticated() {
        let jar = SignedCookieJar::new(signing_key("secret"));

        assert_eq!(role_from_jar(&jar), Role::Unauthenticated);
    }
}
