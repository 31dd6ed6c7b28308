//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Admin credential check and role assignment
//! - `upload` - Model upload validation, storage, and catalog append

pub mod auth;
pub mod upload;

pub use auth::{AuthError, AuthService};
pub use upload::{ModelUpload, UploadError, UploadOutcome, UploadService, UploadedFile};
