//! Integration tests for Model Showcase.
//!
//! Each test spawns the full router on `127.0.0.1:0` against a fresh
//! temporary directory and talks to it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p model-showcase-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `roles` - Role selection, admin login, logout, and page gating
//! - `uploads` - Model upload and product listing
//! - `viewer` - Generic and featured viewer pages

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use model_showcase_core::Product;
use model_showcase_web::config::{AdminCredentials, AppConfig};
use model_showcase_web::state::AppState;
use reqwest::{
    Client, Response, StatusCode,
    header::{LOCATION, SET_COOKIE},
};
use secrecy::SecretString;
use tempfile::TempDir;

/// Admin username used by every test server.
pub const ADMIN_USERNAME: &str = "admin";

/// Admin password used by every test server.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Session secret shared by test servers unless a test picks its own.
pub const SESSION_SECRET: &str = "integration-test-secret-7f3a9c2e1b8d4f60a5e7";

/// Upload limit for test servers.
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// A running test server with its own data directory.
pub struct TestApp {
    pub addr: SocketAddr,
    /// Client with a cookie store; redirects are not followed.
    pub client: Client,
    dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_secret(SESSION_SECRET).await
    }

    /// Spawn a server whose cookies are signed with `secret`.
    pub async fn spawn_with_secret(secret: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let static_dir = dir.path().join("static");

        let config = AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            session_secret: SecretString::from(secret),
            secure_cookies: false,
            admin: AdminCredentials {
                username: ADMIN_USERNAME.to_string(),
                password: SecretString::from(ADMIN_PASSWORD),
            },
            upload_dir: static_dir.join("models"),
            static_dir,
            data_file: dir.path().join("products.json"),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let state = AppState::new(config)
            .await
            .expect("Failed to create application state");
        let app = model_showcase_web::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: new_client(),
            dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Directory uploaded models are written to.
    pub fn upload_dir(&self) -> PathBuf {
        self.dir.path().join("static").join("models")
    }

    /// Backing JSON file of the product store.
    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("products.json")
    }

    /// Parse the data file directly, bypassing the server.
    pub fn stored_products(&self) -> Vec<Product> {
        let raw = std::fs::read(self.data_file()).expect("Failed to read data file");
        serde_json::from_slice(&raw).expect("Data file is not a valid product array")
    }

    /// Names of the files in the upload directory, sorted.
    pub fn uploaded_files(&self) -> Vec<String> {
        list_dir(&self.upload_dir())
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Failed to send form request")
    }

    /// Submit the upload form with a file part.
    pub async fn upload(
        &self,
        name: &str,
        description: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Response {
        let part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .text("name", name.to_string())
            .text("description", description.to_string())
            .part("model", part);
        self.send_multipart(form).await
    }

    pub async fn send_multipart(&self, form: reqwest::multipart::Form) -> Response {
        self.client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart upload request")
    }

    /// Choose the plain user role.
    pub async fn become_user(&self) {
        let res = self.get("/set_role/user").await;
        assert_redirect(&res, "/products");
    }

    /// Log in with the configured admin credentials.
    pub async fn login_admin(&self) {
        let res = self
            .post_form(
                "/login",
                &[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)],
            )
            .await;
        assert_redirect(&res, "/products");
    }
}

/// A client with its own cookie store that does not follow redirects.
pub fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Assert `res` is a redirect to `location`.
pub fn assert_redirect(res: &Response, location: &str) {
    assert!(
        res.status().is_redirection(),
        "expected redirect to {location}, got {}",
        res.status()
    );
    assert_eq!(
        res.headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
        location
    );
}

/// The `name=value` pair of the first `Set-Cookie` header in `res`.
pub fn set_cookie_pair(res: &Response) -> String {
    let header = res
        .headers()
        .get(SET_COOKIE)
        .expect("Response sets no cookie")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap_or_default().trim().to_owned()
}

/// A client without a cookie store that does not follow redirects.
pub fn cookieless_client() -> Client {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Assert `res` is a 200 and return its body.
pub async fn ok_text(res: Response) -> String {
    assert_eq!(res.status(), StatusCode::OK);
    res.text().await.expect("Failed to read response body")
}

fn list_dir(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(path)
        .expect("Failed to read directory")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
