//! Model upload service.
//!
//! Accepts `.glb` uploads, writes them into the upload directory under a
//! sanitized name, and appends a product record. Rejected uploads leave both
//! the directory and the product list untouched.
//!
//! Writing the model file and appending the record are two separate steps; a
//! crash in between leaves an orphaned file. An upload whose sanitized name
//! matches an existing file replaces it.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use model_showcase_core::{FilenameError, ModelFilename, NewProduct, Product};
use thiserror::Error;
use tracing::instrument;

use crate::store::{ProductStore, StoreError};

/// Errors that can occur while storing an accepted upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Writing the model file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Appending the product record failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A file part received from the upload form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the browser, if any.
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// A submitted upload form.
#[derive(Debug, Clone)]
pub struct ModelUpload {
    pub name: String,
    pub description: String,
    /// `None` when the form carried no file part.
    pub file: Option<UploadedFile>,
}

/// Result of processing an upload.
#[derive(Debug)]
pub enum UploadOutcome {
    /// The model was stored and recorded.
    Accepted(Product),
    /// The upload was ignored; nothing was written.
    Rejected(FilenameError),
}

/// Upload service.
pub struct UploadService<'a> {
    store: &'a ProductStore,
    upload_dir: &'a Path,
}

impl<'a> UploadService<'a> {
    /// Create a new upload service.
    #[must_use]
    pub const fn new(store: &'a ProductStore, upload_dir: &'a Path) -> Self {
        Self { store, upload_dir }
    }

    /// Validate, store, and record an uploaded model.
    ///
    /// # Errors
    ///
    /// Returns an error only for accepted uploads whose file or record could
    /// not be written. Invalid uploads are reported as
    /// [`UploadOutcome::Rejected`].
    #[instrument(skip(self, upload), fields(name = %upload.name))]
    pub async fn accept(&self, upload: ModelUpload) -> Result<UploadOutcome, UploadError> {
        let Some(file) = upload.file else {
            tracing::debug!("Upload has no file part");
            return Ok(UploadOutcome::Rejected(FilenameError::Empty));
        };

        let filename = match ModelFilename::from_upload(file.file_name.as_deref().unwrap_or_default())
        {
            Ok(filename) => filename,
            Err(reason) => {
                tracing::debug!(
                    file_name = file.file_name.as_deref().unwrap_or_default(),
                    %reason,
                    "Upload ignored"
                );
                return Ok(UploadOutcome::Rejected(reason));
            }
        };

        let path = self.upload_dir.join(filename.as_str());
        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(|source| UploadError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = %path.display(), bytes = file.bytes.len(), "Model file saved");

        let product = self
            .store
            .append(NewProduct {
                name: upload.name,
                description: upload.description,
                model: filename.into_inner(),
            })
            .await?;

        Ok(UploadOutcome::Accepted(product))
    }
}
