//! Core types for Model Showcase.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod filename;
pub mod id;
pub mod product;
pub mod role;

pub use filename::{FilenameError, ModelFilename, sanitize_filename};
pub use id::*;
pub use product::{NewProduct, Product};
pub use role::Role;
