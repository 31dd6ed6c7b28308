//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Home page (role selection)
//! GET  /set_role/{role}   - Choose the user role, or go to admin login
//!
//! # Auth
//! GET  /login             - Admin login page
//! POST /login             - Admin login action
//! GET  /logout            - Clear the session
//!
//! # Products (requires a role)
//! GET  /products          - Product listing
//! GET  /upload            - Upload form
//! POST /upload            - Upload action (multipart)
//!
//! # Viewer
//! GET  /viewer/{model}    - 3D viewer for a model file
//! ```

pub mod auth;
pub mod home;
pub mod products;
pub mod upload;
pub mod viewer;

use axum::{Router, extract::DefaultBodyLimit, routing::get};

use crate::state::AppState;

/// Create the main application routes.
///
/// `max_upload_bytes` bounds the request body accepted by `POST /upload`.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/set_role/{role}", get(auth::set_role))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/products", get(products::index))
        .route(
            "/upload",
            get(upload::form)
                .post(upload::submit)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/viewer/{model}", get(viewer::show))
}
