//! Model Showcase web application.
//!
//! Visitors pick a role, upload `.glb` models with a name and description,
//! browse the uploaded catalog, and open models in a 3D viewer. Products are
//! kept in a single JSON file; model files are served from the static
//! directory.
//!
//! The crate is a library so the router can be driven by integration tests;
//! the `model-showcase` binary wires it to a TCP listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Build the full application router with its middleware.
///
/// Sentry layers are not included; the binary adds them outermost.
pub fn build_router(state: AppState) -> Router {
    let config = state.config();
    let static_files = ServeDir::new(&config.static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes(config.max_upload_bytes))
        .nest_service("/static", static_files)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
