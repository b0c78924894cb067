//! Error types for authentication and credential operations
//!
//! This module defines the errors that can occur while authenticating the
//! calling principal and while generating validator credentials.

use thiserror::Error;

/// Authentication error types.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer token was presented
    #[error("Missing bearer token")]
    MissingToken,

    /// JWT token has expired
    #[error("Token has expired")]
    TokenExpired,

    /// JWT token is invalid (malformed, bad signature, etc.)
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Principal lacks the superuser capability
    #[error("Forbidden: superuser required")]
    Forbidden,

    /// RSA key pair could not be generated or encoded
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Check if this error should be logged at error level.
    ///
    /// Rejected tokens are expected traffic and are not server errors.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AuthError::KeyGeneration(_) | AuthError::ConfigError(_) | AuthError::Internal(_)
        )
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingToken | AuthError::TokenExpired | AuthError::InvalidToken(_) => 401,
            AuthError::Forbidden => 403,
            AuthError::KeyGeneration(_) | AuthError::ConfigError(_) | AuthError::Internal(_) => {
                500
            }
        }
    }

    /// Get error code for logs and metrics.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidToken(_) => "INVALID_TOKEN",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::KeyGeneration(_) => "KEY_GENERATION_FAILED",
            AuthError::ConfigError(_) => "CONFIG_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
