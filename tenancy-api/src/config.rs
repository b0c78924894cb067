//! Service configuration.
//!
//! Everything the service reads from its environment is collected into
//! [`ServiceConfig`] once at startup. Defaults suit local development.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tenancy_auth::RsaCredentialGenerator;
use tenancy_org::BackendMode;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Smallest RSA modulus accepted for validator keys.
pub const MIN_KEY_BITS: usize = 1024;

/// Organization service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,

    /// Public base URL used to build organization URIs.
    pub base_url: String,

    /// Response convention.
    pub backend_mode: BackendMode,

    /// RSA modulus size for validator keys.
    pub key_bits: usize,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Shared secret for principal tokens.
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,

    /// Account domain used to derive account links.
    pub domain: String,

    /// Explicit password reset URL; derived from `domain` when unset.
    pub password_reset_url: Option<String>,

    /// Emit logs as JSON.
    pub log_json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            base_url: "http://localhost:8080".to_string(),
            backend_mode: BackendMode::Ruby,
            key_bits: RsaCredentialGenerator::DEFAULT_KEY_BITS,
            request_timeout_secs: 30,
            jwt_secret: None,
            domain: "getchef.com".to_string(),
            password_reset_url: None,
            log_json: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TENANCY_BIND_ADDR`: Listen address (default: 0.0.0.0:8080)
    /// - `TENANCY_BASE_URL`: Base URL for organization URIs (default: http://localhost:8080)
    /// - `TENANCY_BACKEND_MODE`: `ruby` or `erlang` (default: ruby)
    /// - `TENANCY_KEY_BITS`: RSA modulus size (default: 2048)
    /// - `TENANCY_REQUEST_TIMEOUT_SECS`: Request timeout (default: 30)
    /// - `TENANCY_JWT_SECRET`: Principal token secret (required)
    /// - `TENANCY_DOMAIN`: Account domain (default: getchef.com)
    /// - `PASSWORD_RESET_URL`: Password reset link (default: derived from domain)
    /// - `TENANCY_LOG_JSON`: JSON log output (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let backend_mode = match lookup("TENANCY_BACKEND_MODE") {
            Some(raw) => raw
                .parse::<BackendMode>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "TENANCY_BACKEND_MODE".to_string(),
                    message,
                })?,
            None => default.backend_mode,
        };

        let jwt_secret = lookup("TENANCY_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("TENANCY_JWT_SECRET".to_string()))?;

        Ok(Self {
            bind_addr: lookup("TENANCY_BIND_ADDR").unwrap_or(default.bind_addr),
            base_url: lookup("TENANCY_BASE_URL").unwrap_or(default.base_url),
            backend_mode,
            key_bits: at_least(
                "TENANCY_KEY_BITS",
                parse_var(&lookup, "TENANCY_KEY_BITS", default.key_bits)?,
                MIN_KEY_BITS,
            )?,
            request_timeout_secs: at_least(
                "TENANCY_REQUEST_TIMEOUT_SECS",
                parse_var(
                    &lookup,
                    "TENANCY_REQUEST_TIMEOUT_SECS",
                    default.request_timeout_secs,
                )?,
                1,
            )?,
            jwt_secret: Some(jwt_secret),
            domain: lookup("TENANCY_DOMAIN").unwrap_or(default.domain),
            password_reset_url: lookup("PASSWORD_RESET_URL"),
            log_json: lookup("TENANCY_LOG_JSON")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(default.log_json),
        })
    }

    /// Request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Where users go to reset a forgotten password.
    pub fn password_reset_url(&self) -> String {
        self.password_reset_url
            .clone()
            .unwrap_or_else(|| format!("https://{}/account/password_resets/new", self.domain))
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn at_least<T>(key: &str, value: T, min: T) -> Result<T, ConfigError>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("must be at least {}, got {}", min, value),
        });
    }
    Ok(value)
}
