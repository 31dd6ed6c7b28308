//! Model Showcase Core - Shared types library.
//!
//! This crate provides the domain types used across Model Showcase components:
//! - `showcase` - The web application (routing, sessions, uploads)
//! - `integration-tests` - End-to-end tests against a running server
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no filesystem access. This keeps it lightweight and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Product records, type-safe IDs, session roles, and upload filenames

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
