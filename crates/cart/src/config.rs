//! Cart service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_BASE_URL` - Base URL of the catalog/stock service
//! - `CART_DATABASE_URL` - `PostgreSQL` connection string (when `CART_STORAGE=postgres`)
//!
//! ## Optional
//! - `CART_HOST` - Bind address (default: 127.0.0.1)
//! - `CART_PORT` - Listen port (default: 3000)
//! - `CART_STORAGE` - Storage backend: `postgres` (default) or `memory`
//! - `CART_STORAGE_KEY` - Key of the persistent cart slot (default: shoebox:cart)
//! - `CATALOG_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `CATALOG_CACHE_TTL_SECS` - Product cache TTL, 0 disables caching (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart service configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Persistent storage backend for the cart slot
    pub storage: StorageConfig,
    /// Key of the persistent cart slot
    pub storage_key: String,
    /// Catalog/stock service client configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Persistent storage backend selection.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// `PostgreSQL`-backed slot (production default).
    Postgres {
        /// Connection string (contains password)
        database_url: SecretString,
    },
    /// Process-local slot, lost on restart (development and tests).
    Memory,
}

/// Catalog/stock service client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service; always carries a trailing slash
    pub base_url: Url,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Product description cache TTL in seconds (stock is never cached)
    pub cache_ttl_secs: u64,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CART_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CART_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CART_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CART_PORT".to_string(), e.to_string()))?;

        let storage = StorageConfig::parse(
            &get_env_or_default("CART_STORAGE", "postgres"),
            get_database_url("CART_DATABASE_URL"),
        )?;
        let storage_key = get_env_or_default("CART_STORAGE_KEY", "shoebox:cart");

        let catalog = CatalogConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            storage,
            storage_key,
            catalog,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StorageConfig {
    /// Resolve the backend from its name and the (optional) database URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown backend name, or for `postgres`
    /// without a database URL.
    pub fn parse(kind: &str, database_url: Option<SecretString>) -> Result<Self, ConfigError> {
        match kind {
            "postgres" => database_url.map_or_else(
                || Err(ConfigError::MissingEnvVar("CART_DATABASE_URL".to_string())),
                |database_url| Ok(Self::Postgres { database_url }),
            ),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE".to_string(),
                format!("expected 'postgres' or 'memory', got '{other}'"),
            )),
        }
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&get_required_env("CATALOG_BASE_URL")?)?;
        let timeout_secs = get_env_or_default("CATALOG_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        let cache_ttl_secs = get_env_or_default("CATALOG_CACHE_TTL_SECS", "300")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_CACHE_TTL_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            timeout_secs,
            cache_ttl_secs,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL` (used by managed postgres attach).
fn get_database_url(primary_key: &str) -> Option<SecretString> {
    // Try primary key first (e.g., CART_DATABASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Some(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL
    std::env::var("DATABASE_URL").ok().map(SecretString::from)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the catalog base URL, normalizing to a trailing slash so that
/// `Url::join` appends path segments instead of replacing the last one.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url = parse_base_url("http://localhost:3333/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/api/");

        let url = parse_base_url("http://localhost:3333/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let result = parse_base_url("not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_storage_parse_memory() {
        let storage = StorageConfig::parse("memory", None).unwrap();
        assert!(matches!(storage, StorageConfig::Memory));
    }

    #[test]
    fn test_storage_parse_postgres_requires_url() {
        let result = StorageConfig::parse("postgres", None);
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));

        let storage = StorageConfig::parse(
            "postgres",
            Some(SecretString::from("postgres://localhost/shoebox")),
        )
        .unwrap();
        assert!(matches!(storage, StorageConfig::Postgres { .. }));
    }

    #[test]
    fn test_storage_parse_unknown_kind() {
        let result = StorageConfig::parse("redis", None);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_socket_addr() {
        let config = CartConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            storage: StorageConfig::Memory,
            storage_key: "shoebox:cart".to_string(),
            catalog: CatalogConfig {
                base_url: parse_base_url("http://localhost:3333").unwrap(),
                timeout_secs: 10,
                cache_ttl_secs: 300,
            },
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
