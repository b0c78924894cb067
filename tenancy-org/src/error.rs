//! Error types for organization operations
//!
//! `StoreError` is what a persistence backend reports; `OrgError` is the
//! taxonomy the organization resource service exposes to callers.

use thiserror::Error;

/// Exact message returned when a create collides with an existing name.
pub const ALREADY_EXISTS_MESSAGE: &str = "Organization already exists.";

/// Organization store error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No live organization has this name
    #[error("Organization not found: {0}")]
    NotFound(String),

    /// Create-if-absent found the name taken
    #[error("Organization already exists: {0}")]
    AlreadyExists(String),

    /// Rename target is owned by a different organization
    #[error("Organization name already in use: {0}")]
    ConflictOnNewName(String),

    /// Record changed between read and replace
    #[error("Organization modified concurrently: {0}")]
    Modified(String),

    /// Backend could not be reached; the caller may retry
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Organization resource error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrgError {
    /// Operation targets a name absent from the store
    #[error("Cannot load organization {0}")]
    NotFound(String),

    /// Create collided with an existing organization
    #[error("Organization already exists.")]
    AlreadyExists,

    /// Rename onto a name owned by a different organization
    #[error("Organization '{0}' already exists.")]
    RenameConflict(String),

    /// Update kept losing races with other writers
    #[error("Organization '{0}' was modified concurrently; retry the request")]
    ConcurrentModification(String),

    /// Update payload carried `private_key`
    #[error("Updating the private_key of an organization via PUT is no longer supported")]
    KeyUpdateForbidden,

    /// Malformed or missing request fields
    #[error("{0}")]
    Validation(String),

    /// Persistence layer failure
    #[error("Organization store unavailable: {0}")]
    StoreUnavailable(String),

    /// Key generation failed
    #[error("Credential generation failed: {0}")]
    Credential(String),
}

/// Result type for organization operations.
pub type OrgResult<T> = Result<T, OrgError>;

impl OrgError {
    /// Check if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(self, OrgError::StoreUnavailable(_) | OrgError::Credential(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            OrgError::NotFound(_) => 404,
            OrgError::AlreadyExists
            | OrgError::RenameConflict(_)
            | OrgError::ConcurrentModification(_) => 409,
            OrgError::KeyUpdateForbidden => 410,
            OrgError::Validation(_) => 400,
            OrgError::StoreUnavailable(_) => 503,
            OrgError::Credential(_) => 500,
        }
    }

    /// Get error code for logs and metrics.
    pub fn error_code(&self) -> &'static str {
        match self {
            OrgError::NotFound(_) => "NOT_FOUND",
            OrgError::AlreadyExists => "ALREADY_EXISTS",
            OrgError::RenameConflict(_) => "RENAME_CONFLICT",
            OrgError::ConcurrentModification(_) => "CONCURRENT_MODIFICATION",
            OrgError::KeyUpdateForbidden => "KEY_UPDATE_FORBIDDEN",
            OrgError::Validation(_) => "VALIDATION_ERROR",
            OrgError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            OrgError::Credential(_) => "CREDENTIAL_ERROR",
        }
    }
}

impl From<StoreError> for OrgError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(name) => OrgError::NotFound(name),
            StoreError::AlreadyExists(_) => OrgError::AlreadyExists,
            StoreError::ConflictOnNewName(name) => OrgError::RenameConflict(name),
            StoreError::Modified(name) => OrgError::ConcurrentModification(name),
            StoreError::Unavailable(reason) => OrgError::StoreUnavailable(reason),
        }
    }
}
