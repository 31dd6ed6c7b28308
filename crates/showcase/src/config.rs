//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup and passed to components through
//! [`AppState`](crate::state::AppState). Nothing else reads the environment.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults suit local development.
//!
//! - `SHOWCASE_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOWCASE_PORT` - Listen port (default: 5000)
//! - `SHOWCASE_SESSION_SECRET` - Session cookie signing secret (default: `supersecretkey`)
//! - `SHOWCASE_SECURE_COOKIES` - Mark the session cookie `Secure` (default: false)
//! - `SHOWCASE_ADMIN_USERNAME` - Admin login name (default: admin)
//! - `SHOWCASE_ADMIN_PASSWORD` - Admin login password (default: admin123)
//! - `SHOWCASE_STATIC_DIR` - Directory served under `/static` (default: static)
//! - `SHOWCASE_UPLOAD_DIR` - Where uploaded models are written (default: `<static>/models`)
//! - `SHOWCASE_DATA_FILE` - JSON product list (default: products.json)
//! - `SHOWCASE_MAX_UPLOAD_MB` - Upload body limit in MiB (default: 100)
//! - `SHOWCASE_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const DEFAULT_SESSION_SECRET: &str = "supersecretkey";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_MAX_UPLOAD_MB: usize = 100;
const DEFAULT_STATIC_DIR: &str = "crates/showcase/static";

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Model Showcase application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Session cookie signing secret
    pub session_secret: SecretString,
    /// Whether the session cookie carries the `Secure` attribute
    pub secure_cookies: bool,
    /// The single admin account
    pub admin: AdminCredentials,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Directory uploaded models are written to
    pub upload_dir: PathBuf,
    /// JSON file holding the product list
    pub data_file: PathBuf,
    /// Maximum accepted upload request size in bytes
    pub max_upload_bytes: usize,
    /// Emit structured JSON logs instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Admin login credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AdminCredentials {
    /// Check a submitted username/password pair by exact string equality.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose_secret() == password
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SHOWCASE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOWCASE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHOWCASE_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOWCASE_PORT".to_string(), e.to_string()))?;
        let max_upload_mb = get_optional_env("SHOWCASE_MAX_UPLOAD_MB")
            .map(|v| v.parse::<usize>())
            .transpose()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOWCASE_MAX_UPLOAD_MB".to_string(), e.to_string())
            })?
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB);

        let static_dir = PathBuf::from(get_env_or_default("SHOWCASE_STATIC_DIR", DEFAULT_STATIC_DIR));
        let upload_dir = get_optional_env("SHOWCASE_UPLOAD_DIR")
            .map_or_else(|| static_dir.join("models"), PathBuf::from);

        Ok(Self {
            host,
            port,
            session_secret: SecretString::from(get_env_or_default(
                "SHOWCASE_SESSION_SECRET",
                DEFAULT_SESSION_SECRET,
            )),
            secure_cookies: get_flag("SHOWCASE_SECURE_COOKIES"),
            admin: AdminCredentials {
                username: get_env_or_default("SHOWCASE_ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME),
                password: SecretString::from(get_env_or_default(
                    "SHOWCASE_ADMIN_PASSWORD",
                    DEFAULT_ADMIN_PASSWORD,
                )),
            },
            static_dir,
            upload_dir,
            data_file: PathBuf::from(get_env_or_default("SHOWCASE_DATA_FILE", "products.json")),
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
            log_json: get_flag("SHOWCASE_LOG_JSON"),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Describe why the session secret is weak, if it is.
    ///
    /// A weak secret is allowed (the development default is weak) but should
    /// be logged at startup.
    #[must_use]
    pub fn session_secret_weakness(&self) -> Option<String> {
        secret_weakness(self.session_secret.expose_secret())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a boolean flag; any value other than empty, `0` or `false` enables it.
fn get_flag(key: &str) -> bool {
    get_optional_env(key).is_some_and(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Check length, placeholder patterns and entropy of a signing secret.
fn secret_weakness(secret: &str) -> Option<String> {
    if secret.len() < MIN_SESSION_SECRET_LENGTH {
        return Some(format!(
            "shorter than {MIN_SESSION_SECRET_LENGTH} characters (got {})",
            secret.len()
        ));
    }

    let lower = secret.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(**p)) {
        return Some(format!("appears to be a placeholder (contains '{pattern}')"));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Some(format!(
            "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
        ));
    }

    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 5000,
            session_secret: SecretString::from(DEFAULT_SESSION_SECRET),
            secure_cookies: false,
            admin: AdminCredentials {
                username: "admin".to_string(),
                password: SecretString::from("admin123"),
            },
            static_dir: PathBuf::from("static"),
            upload_dir: PathBuf::from("static/models"),
            data_file: PathBuf::from("products.json"),
            max_upload_bytes: 1024,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_default_secret_is_weak() {
        let weakness = test_config().session_secret_weakness();
        assert!(weakness.unwrap().contains("shorter than"));
    }

    #[test]
    fn test_placeholder_secret_is_weak() {
        let weakness = secret_weakness("my-secret-value-padded-to-forty-characters");
        assert!(weakness.unwrap().contains("placeholder"));
    }

    #[test]
    fn test_low_entropy_secret_is_weak() {
        let weakness = secret_weakness(&"a".repeat(40));
        assert!(weakness.unwrap().contains("entropy"));
    }

    #[test]
    fn test_random_secret_is_strong() {
        assert!(secret_weakness("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%").is_none());
    }

    #[test]
    fn test_admin_credentials_exact_match() {
        let admin = test_config().admin;
        assert!(admin.matches("admin", "admin123"));
        assert!(!admin.matches("Admin", "admin123"));
        assert!(!admin.matches("admin", "admin123 "));
        assert!(!admin.matches("", ""));
    }

    #[test]
    fn test_admin_credentials_debug_redacts_password() {
        let debug_output = format!("{:?}", test_config().admin);
        assert!(debug_output.contains("admin"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("admin123"));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("true"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("FALSE"));
    }

    #[test]
    fn test_socket_addr() {
        let addr = test_config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 5000);
    }
}
