//! Visitor roles tracked in the session.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The role a visitor has selected for their browser session.
///
/// A session without a stored role is [`Role::Unauthenticated`]. Both
/// [`Role::User`] and [`Role::Admin`] have the same access rights; the role is
/// only shown as a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Unauthenticated,
    User,
    Admin,
}

impl Role {
    /// Whether this role may open the gated listing and upload pages.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        match self {
            Self::User | Self::Admin => true,
            Self::Unauthenticated => false,
        }
    }

    /// Label shown in page headers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unauthenticated => "guest",
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse a label written by [`Role::label`].
    ///
    /// Only `user` and `admin` are accepted; anything else is `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
