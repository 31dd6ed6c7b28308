//! Product listing route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use model_showcase_core::{Product, Role};
use tracing::instrument;

use crate::filters;
use crate::middleware::RequireRole;
use crate::state::AppState;

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<Product>,
    pub role: Role,
}

/// Display every product in upload order.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, RequireRole(role): RequireRole) -> impl IntoResponse {
    let products = state.store().load().await;
    tracing::debug!(count = products.len(), "Loaded products");

    ProductsIndexTemplate { products, role }
}
