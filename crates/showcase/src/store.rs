//! Product store backed by a single JSON file.
//!
//! # Data File
//!
//! The file holds a JSON array of [`Product`] records:
//!
//! ```json
//! [{"id":1,"name":"Chair","description":"Oak","model":"chair.glb"}]
//! ```
//!
//! Reads never fail: a missing, unreadable, or malformed file loads as an
//! empty list. Writes replace the whole file via a temporary file and a
//! rename, so readers never observe a half-written document.
//!
//! # Concurrency
//!
//! [`ProductStore::append`] runs its load-modify-save cycle under an async
//! mutex, so concurrent uploads within one process cannot lose each other's
//! records. Writers in other processes are not coordinated.

use std::path::{Path, PathBuf};

use model_showcase_core::{NewProduct, Product};
use tokio::sync::Mutex;
use tracing::instrument;

/// Errors from writing the data file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the product list failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// JSON-file-backed list of products.
#[derive(Debug)]
pub struct ProductStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ProductStore {
    /// Create a store for the given data file. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data file as an empty array if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the parent directory or the file cannot be
    /// created.
    pub async fn init(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        if !exists {
            tracing::info!(path = %self.path.display(), "Creating empty product list");
            self.save(&[]).await?;
        }

        Ok(())
    }

    /// Load every product in file order.
    ///
    /// Returns an empty list if the file is missing, unreadable, or not a
    /// valid product array.
    pub async fn load(&self) -> Vec<Product> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read product list");
                return Vec::new();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Product list is not valid JSON");
            Vec::new()
        })
    }

    /// Overwrite the data file with `products`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write, or the rename
    /// fails.
    pub async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let json = serde_json::to_vec(products)?;
        let tmp = self.temp_path();

        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::io(&self.path, e));
        }

        Ok(())
    }

    /// Append a product, assigning `id = current count + 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be saved.
    #[instrument(skip(self, new), fields(model = %new.model))]
    pub async fn append(&self, new: NewProduct) -> Result<Product, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut products = self.load().await;
        let product = new.into_product(products.len());
        products.push(product.clone());
        self.save(&products).await?;

        tracing::info!(id = %product.id, "Product added");
        Ok(product)
    }

    /// Sibling path used for atomic replacement of the data file.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map_or_else(|| "products.json".into(), |n| n.to_string_lossy());
        self.path
            .with_file_name(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()))
    }
}
