//! Application state shared across handlers.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use secrecy::ExposeSecret;

use crate::config::AppConfig;
use crate::middleware::signing_key;
use crate::store::{ProductStore, StoreError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the product store, and the cookie signing key.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    store: ProductStore,
    cookie_key: Key,
}

impl AppState {
    /// Create the application state and prepare the filesystem.
    ///
    /// Creates the upload directory and initializes the product data file if
    /// either is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload directory or data file cannot be created.
    pub async fn new(config: AppConfig) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(&config.upload_dir)
            .await
            .map_err(|source| StoreError::Io {
                path: config.upload_dir.clone(),
                source,
            })?;

        let store = ProductStore::new(config.data_file.clone());
        store.init().await?;

        let cookie_key = signing_key(config.session_secret.expose_secret());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                cookie_key,
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the product store.
    #[must_use]
    pub fn store(&self) -> &ProductStore {
        &self.inner.store
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.inner.cookie_key.clone()
    }
}
