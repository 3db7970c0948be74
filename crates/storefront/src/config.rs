//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOP_API_BASE_URL` - Base URL of the upstream shop API. Missing or
//!   malformed values fall back to the public demo endpoint with a logged
//!   warning; startup never fails on this variable.
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `RUST_LOG` - Tracing filter override

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Public demo endpoint used when no upstream is configured.
pub const DEFAULT_SHOP_API_BASE_URL: &str = "https://fakestoreapi.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the upstream shop API
    pub api_base_url: Url,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., "production")
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the host or port variables are present but
    /// unparseable. A bad upstream URL is not an error: it falls back to the
    /// demo endpoint (see [`resolve_api_base_url`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = resolve_api_base_url(get_optional_env("SHOP_API_BASE_URL").as_deref());
        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            api_base_url,
            host,
            port,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Resolve the upstream base URL from an optional environment value.
///
/// The storefront must come up even when the variable is absent or garbage,
/// so anything that does not parse as an absolute URL falls back to
/// [`DEFAULT_SHOP_API_BASE_URL`] with a logged warning.
#[must_use]
pub fn resolve_api_base_url(raw: Option<&str>) -> Url {
    let fallback =
        || Url::parse(DEFAULT_SHOP_API_BASE_URL).expect("default base URL is well-formed");

    match raw {
        None => fallback(),
        Some(value) => match Url::parse(value) {
            Ok(url) if url.host_str().is_some() => url,
            Ok(_) => {
                tracing::warn!(
                    value,
                    "SHOP_API_BASE_URL has no host; falling back to demo endpoint"
                );
                fallback()
            }
            Err(e) => {
                tracing::warn!(
                    value,
                    error = %e,
                    "SHOP_API_BASE_URL is not a valid URL; falling back to demo endpoint"
                );
                fallback()
            }
        },
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
