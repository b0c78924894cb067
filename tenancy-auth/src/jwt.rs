//! JWT token generation and validation
//!
//! This module provides JWT token operations using the jsonwebtoken crate.
//! HS256 is used for shared-secret deployments; RS256 accepts the PKCS#1 PEM
//! keys produced by the credential generator.

use crate::claims::{PrincipalClaims, DEFAULT_AUDIENCE, DEFAULT_ISSUER};
use crate::error::{AuthError, AuthResult};
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for HS256
    pub secret: Option<String>,

    /// Private key (PEM) for RS256
    pub private_key: Option<String>,

    /// Public key (PEM) for RS256
    pub public_key: Option<String>,

    /// Algorithm to use
    pub algorithm: JwtAlgorithm,

    /// Token issuer
    pub issuer: String,

    /// Token audience
    pub audience: Vec<String>,

    /// Lifetime of issued tokens
    pub token_duration: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            private_key: None,
            public_key: None,
            algorithm: JwtAlgorithm::HS256,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: vec![DEFAULT_AUDIENCE.to_string()],
            token_duration: Duration::hours(1),
        }
    }
}

/// Supported JWT algorithms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum JwtAlgorithm {
    /// HMAC using SHA-256
    HS256,
    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256,
}

impl From<JwtAlgorithm> for Algorithm {
    fn from(alg: JwtAlgorithm) -> Self {
        match alg {
            JwtAlgorithm::HS256 => Algorithm::HS256,
            JwtAlgorithm::RS256 => Algorithm::RS256,
        }
    }
}

/// JWT service for token operations.
pub struct JwtService {
    config: JwtConfig,
    encoding_key: Option<EncodingKey>,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &self.config.algorithm)
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration.
    ///
    /// An RS256 service without a private key can validate but not issue.
    pub fn new(config: JwtConfig) -> AuthResult<Self> {
        let encoding_key = Self::create_encoding_key(&config)?;
        let decoding_key = Self::create_decoding_key(&config)?;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    /// Create with a shared secret (HS256).
    pub fn with_secret(secret: impl Into<String>) -> AuthResult<Self> {
        let config = JwtConfig {
            secret: Some(secret.into()),
            algorithm: JwtAlgorithm::HS256,
            ..Default::default()
        };
        Self::new(config)
    }

    /// Create with an RSA key pair in PEM form (RS256).
    pub fn with_rsa_keys(
        private_key: Option<String>,
        public_key: impl Into<String>,
    ) -> AuthResult<Self> {
        let config = JwtConfig {
            private_key,
            public_key: Some(public_key.into()),
            algorithm: JwtAlgorithm::RS256,
            ..Default::default()
        };
        Self::new(config)
    }

    fn create_encoding_key(config: &JwtConfig) -> AuthResult<Option<EncodingKey>> {
        match config.algorithm {
            JwtAlgorithm::HS256 => {
                let secret = config.secret.as_ref().ok_or_else(|| {
                    AuthError::ConfigError("Secret required for HMAC".to_string())
                })?;
                Ok(Some(EncodingKey::from_secret(secret.as_bytes())))
            }
            JwtAlgorithm::RS256 => config
                .private_key
                .as_ref()
                .map(|key| {
                    EncodingKey::from_rsa_pem(key.as_bytes()).map_err(|e| {
                        AuthError::ConfigError(format!("Invalid RSA private key: {}", e))
                    })
                })
                .transpose(),
        }
    }

    fn create_decoding_key(config: &JwtConfig) -> AuthResult<DecodingKey> {
        match config.algorithm {
            JwtAlgorithm::HS256 => {
                let secret = config.secret.as_ref().ok_or_else(|| {
                    AuthError::ConfigError("Secret required for HMAC".to_string())
                })?;
                Ok(DecodingKey::from_secret(secret.as_bytes()))
            }
            JwtAlgorithm::RS256 => {
                let key = config.public_key.as_ref().ok_or_else(|| {
                    AuthError::ConfigError("Public key required for RSA".to_string())
                })?;
                DecodingKey::from_rsa_pem(key.as_bytes())
                    .map_err(|e| AuthError::ConfigError(format!("Invalid RSA public key: {}", e)))
            }
        }
    }

    /// Issue a token for a principal.
    pub fn issue_token(&self, subject: impl Into<String>, superuser: bool) -> AuthResult<String> {
        let mut claims =
            PrincipalClaims::new(subject, self.config.token_duration).with_superuser(superuser);
        claims.iss = self.config.issuer.clone();
        claims.aud = self.config.audience.clone();
        self.encode_claims(&claims)
    }

    /// Generate a token from existing claims.
    pub fn encode_claims(&self, claims: &PrincipalClaims) -> AuthResult<String> {
        let key = self.encoding_key.as_ref().ok_or_else(|| {
            AuthError::ConfigError("No signing key configured".to_string())
        })?;
        let header = Header::new(self.config.algorithm.into());
        encode(&header, claims, key)
            .map_err(|e| AuthError::Internal(format!("Token encoding failed: {}", e)))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> AuthResult<PrincipalClaims> {
        let mut validation = Validation::new(self.config.algorithm.into());
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&self.config.audience);

        let token_data = decode::<PrincipalClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AuthError::InvalidToken("Malformed token".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AuthError::InvalidToken("Invalid signature".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AuthError::InvalidToken("Invalid issuer".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    AuthError::InvalidToken("Invalid audience".to_string())
                }
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Get the configuration.
    pub fn config(&self) -> &JwtConfig {
        &self.config
    }
}
