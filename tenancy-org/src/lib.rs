//! # Tenancy Organizations
//!
//! This crate provides the organization record and everything the
//! `/organizations` resource needs below the HTTP layer.
//!
//! ## Overview
//!
//! The tenancy-org crate handles:
//! - **Organizations**: Top-level tenancy containers keyed by a unique name
//! - **Validation**: Pluggable organization name grammar
//! - **Store**: Linearizable name→record storage with atomic renames
//! - **Projector**: Ruby-style and erlang-style response shaping
//! - **Errors**: The error taxonomy surfaced by the organization service
//!
//! ## Architecture
//!
//! ```text
//! Organization
//!   ├─ name / full_name / org_type
//!   ├─ guid, assigned_at        (fixed at creation)
//!   └─ validator client         (<name>-validator + RSA key pair)
//!
//! OrganizationStore ──→ Projector(BackendMode) ──→ response document
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tenancy_org::{
//!     BackendMode, MemoryOrganizationStore, Organization, OrganizationStore, Projector,
//!     ValidatorCredentials,
//! };
//!
//! async fn example(credentials: ValidatorCredentials) {
//!     let store = MemoryOrganizationStore::new();
//!     let org = Organization::new("acme", "Acme Corp", credentials);
//!     let stored = store.create_if_absent(org).await.unwrap();
//!
//!     let projector = Projector::new(BackendMode::Ruby, "https://api.example.com");
//!     println!("{}", projector.read(&stored).body);
//! }
//! ```
//!
//! ## Cross-Crate Integration
//!
//! - `tenancy-auth`: Generates the validator credentials
//! - `tenancy-api`: Organization resource service and HTTP surface

pub mod error;
pub mod organization;
pub mod projector;
pub mod store;
pub mod validation;

// Re-export main types for convenience
pub use error::{OrgError, OrgResult, StoreError, StoreResult, ALREADY_EXISTS_MESSAGE};
pub use organization::{validator_client_name, Organization, ValidatorCredentials};
pub use projector::{BackendMode, Projection, Projector};
pub use store::{MemoryOrganizationStore, OrganizationStore};
pub use validation::{NameValidator, UrlSafeNameValidator};
