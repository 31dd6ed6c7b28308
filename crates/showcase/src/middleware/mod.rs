//! HTTP middleware for the showcase.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//!
//! The visitor role lives in a signed cookie read by the extractors in
//! [`auth`]; no session layer is involved.

pub mod auth;
pub mod session;

pub use auth::{CurrentRole, RequireRole, clear_session, set_role};
pub use session::signing_key;
