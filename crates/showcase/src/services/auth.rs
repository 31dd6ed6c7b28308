//! Authentication service.
//!
//! There is a single admin account taken from configuration. Choosing the
//! plain user role needs no credentials and does not go through here.

use model_showcase_core::Role;
use thiserror::Error;

use crate::config::AdminCredentials;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password did not match.
    #[error("invalid admin credentials")]
    InvalidCredentials,
}

/// Authentication service.
pub struct AuthService<'a> {
    admin: &'a AdminCredentials,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(admin: &'a AdminCredentials) -> Self {
        Self { admin }
    }

    /// Check admin credentials and return the role to store in the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` unless both username and
    /// password match exactly.
    pub fn login_admin(&self, username: &str, password: &str) -> Result<Role, AuthError> {
        if self.admin.matches(username, password) {
            tracing::info!(username, "Admin logged in");
            Ok(Role::Admin)
        } else {
            tracing::warn!(username, "Admin login failed");
            Err(AuthError::InvalidCredentials)
        }
    }
}
