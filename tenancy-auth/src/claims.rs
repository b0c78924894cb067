//! Principal claims
//!
//! The calling principal is authenticated upstream and presented to the
//! service as a signed JWT. The only capability the organization resource
//! cares about is whether the principal is a superuser.

use crate::error::{AuthError, AuthResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token issuer.
pub const DEFAULT_ISSUER: &str = "tenancy-platform";

/// Default token audience.
pub const DEFAULT_AUDIENCE: &str = "organizations";

/// JWT claims identifying the calling principal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrincipalClaims {
    /// Subject (principal name)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: Vec<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// JWT ID
    pub jti: String,

    /// Superuser capability
    #[serde(default)]
    pub superuser: bool,
}

impl PrincipalClaims {
    /// Create claims for an ordinary principal valid for `duration`.
    pub fn new(subject: impl Into<String>, duration: chrono::Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            iss: DEFAULT_ISSUER.to_string(),
            aud: vec![DEFAULT_AUDIENCE.to_string()],
            exp: (now + duration).timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            superuser: false,
        }
    }

    /// Set the superuser capability.
    pub fn with_superuser(mut self, superuser: bool) -> Self {
        self.superuser = superuser;
        self
    }

    /// Check if the token is expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get expiration as DateTime.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Principal name
    pub name: String,

    /// Whether the principal may mutate organizations
    pub superuser: bool,
}

impl Principal {
    /// Fail with [`AuthError::Forbidden`] unless the principal is a superuser.
    pub fn require_superuser(&self) -> AuthResult<()> {
        if self.superuser {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl From<PrincipalClaims> for Principal {
    fn from(claims: PrincipalClaims) -> Self {
        Self {
            name: claims.sub,
            superuser: claims.superuser,
        }
    }
}
