//! # Tenancy Authentication
//!
//! This crate provides the credential and identity pieces of the tenancy
//! platform.
//!
//! ## Overview
//!
//! The tenancy-auth crate handles:
//! - **Credentials**: RSA key pairs for each organization's validator client
//! - **JWT**: Token issuance and validation (HS256 shared secret, RS256 keys)
//! - **Principals**: The authenticated caller and its superuser capability
//!
//! ## Usage
//!
//! ### Validator Credentials
//!
//! ```rust,no_run
//! use tenancy_auth::{CredentialGenerator, RsaCredentialGenerator};
//!
//! let generator = RsaCredentialGenerator::default();
//! let credentials = generator.generate("acme").unwrap();
//! assert_eq!(credentials.clientname, "acme-validator");
//! ```
//!
//! ### Principal Tokens
//!
//! ```rust,no_run
//! use tenancy_auth::{JwtService, Principal};
//!
//! let service = JwtService::with_secret("your-secret-key").unwrap();
//! let token = service.issue_token("pivotal", true).unwrap();
//!
//! let principal = Principal::from(service.validate_token(&token).unwrap());
//! assert!(principal.require_superuser().is_ok());
//! ```
//!
//! ## Cross-Crate Integration
//!
//! - `tenancy-org`: Credentials are stored on the organization record
//! - `tenancy-api`: Authenticates requests and generates keys on create

pub mod claims;
pub mod credentials;
pub mod error;
pub mod jwt;

// Re-export main types
pub use claims::{Principal, PrincipalClaims};
pub use credentials::{CredentialGenerator, RsaCredentialGenerator};
pub use error::{AuthError, AuthResult};
pub use jwt::{JwtAlgorithm, JwtConfig, JwtService};
