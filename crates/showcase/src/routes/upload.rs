//! Model upload route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use model_showcase_core::Role;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireRole;
use crate::services::{ModelUpload, UploadOutcome, UploadService, UploadedFile};
use crate::state::AppState;

/// Upload form template.
#[derive(Template, WebTemplate)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
    pub role: Role,
}

/// Display the upload form.
pub async fn form(RequireRole(role): RequireRole) -> impl IntoResponse {
    UploadTemplate { role }
}

/// Handle an upload form submission.
///
/// Accepted uploads redirect to the listing. Uploads without a `.glb` file
/// get the form again with no message.
pub async fn submit(
    State(state): State<AppState>,
    RequireRole(role): RequireRole,
    multipart: Multipart,
) -> Result<Response> {
    let upload = read_upload_form(multipart).await?;

    let service = UploadService::new(state.store(), &state.config().upload_dir);
    match service.accept(upload).await? {
        UploadOutcome::Accepted(product) => {
            tracing::info!(id = %product.id, model = %product.model, %role, "Model uploaded");
            Ok(Redirect::to("/products").into_response())
        }
        UploadOutcome::Rejected(_) => Ok(UploadTemplate { role }.into_response()),
    }
}

/// Collect the `name`, `description`, and `model` parts of the form.
async fn read_upload_form(mut multipart: Multipart) -> Result<ModelUpload> {
    let mut name = None;
    let mut description = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("name") => name = Some(field.text().await.map_err(multipart_error)?),
            Some("description") => {
                description = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("model") => {
                let file_name = field.file_name().map(ToString::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some(UploadedFile { file_name, bytes });
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let name = name.ok_or_else(|| AppError::BadRequest("Missing 'name' field".into()))?;
    let description =
        description.ok_or_else(|| AppError::BadRequest("Missing 'description' field".into()))?;

    Ok(ModelUpload {
        name,
        description,
        file,
    })
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(format!("Multipart error: {}", err.body_text()))
    }
}
