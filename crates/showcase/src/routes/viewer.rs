//! Model viewer route handler.
//!
//! The requested filename is passed straight to the page; nothing checks that
//! the file exists or is listed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Path,
    response::{IntoResponse, Response},
};

use crate::filters;

/// Filename that gets the dedicated showcase page instead of the generic
/// viewer. Compared case-insensitively.
pub const FEATURED_MODEL: &str = "apple_vision_pro.glb";

/// Generic viewer template.
#[derive(Template, WebTemplate)]
#[template(path = "viewer.html")]
pub struct ViewerTemplate {
    pub model: String,
}

/// Dedicated page for [`FEATURED_MODEL`].
#[derive(Template, WebTemplate)]
#[template(path = "apple.html")]
pub struct AppleTemplate;

/// Whether `model` names the featured model.
#[must_use]
pub fn is_featured(model: &str) -> bool {
    model.to_lowercase() == FEATURED_MODEL
}

/// Render the viewer for `model`.
pub async fn show(Path(model): Path<String>) -> Response {
    if is_featured(&model) {
        AppleTemplate.into_response()
    } else {
        ViewerTemplate { model }.into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_model_any_case() {
        assert!(is_featured("apple_vision_pro.glb"));
        assert!(is_featured("Apple_Vision_Pro.GLB"));
        assert!(is_featured("APPLE_VISION_PRO.glb"));
    }

    #[test]
    fn test_other_models_are_not_featured() {
        assert!(!is_featured("chair.glb"));
        assert!(!is_featured("apple_vision_pro.glb.bak"));
        assert!(!is_featured(" apple_vision_pro.glb"));
    }

    #[test]
    fn test_viewer_template_renders_model() {
        let html = ViewerTemplate {
            model: "chair.glb".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("chair.glb"));
        assert!(html.contains("data-model="));
    }

    #[test]
    fn test_viewer_template_escapes_model() {
        let html = ViewerTemplate {
            model: "<script>.glb".to_string(),
        }
        .render()
        .unwrap();
        assert!(!html.contains("<script>.glb"));
    }

    #[test]
    fn test_viewer_template_encodes_model_url() {
        let html = ViewerTemplate {
            model: "a#b c.glb".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains(r#"data-model="/static/models/a%23b%20c.glb""#));
    }
}
