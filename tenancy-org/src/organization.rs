//! Organization domain model
//!
//! This module provides the Organization record, the top-level tenancy
//! container that owns users, clients and resources. Each organization is
//! keyed by a unique name and carries the validator client credentials
//! generated when it was created.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Suffix appended to an organization name to form its validator client name.
pub const VALIDATOR_SUFFIX: &str = "-validator";

/// Rendering used for `assigned_at` in API responses.
pub const ASSIGNED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Derive the validator client name for an organization name.
///
/// # Examples
///
/// ```
/// use tenancy_org::organization::validator_client_name;
///
/// assert_eq!(validator_client_name("acme"), "acme-validator");
/// ```
pub fn validator_client_name(org_name: &str) -> String {
    format!("{}{}", org_name, VALIDATOR_SUFFIX)
}

/// Allocate a fresh 32-character organization guid.
pub fn new_guid() -> String {
    Uuid::now_v7().simple().to_string()
}

/// Key material and identity of the validator client provisioned with an
/// organization.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatorCredentials {
    /// Validator client name (`<org>-validator`)
    pub clientname: String,

    /// PEM-encoded public key
    pub public_key: String,

    /// PEM-encoded private key
    pub private_key: String,
}

impl std::fmt::Debug for ValidatorCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorCredentials")
            .field("clientname", &self.clientname)
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// An organization is the unit of tenancy.
///
/// `name`, `full_name` and `org_type` may change through updates. The guid,
/// creation timestamp and key material are fixed at construction and only
/// readable afterwards; `clientname` follows the current name.
///
/// # Examples
///
/// ```
/// use tenancy_org::{Organization, ValidatorCredentials};
///
/// let credentials = ValidatorCredentials {
///     clientname: "acme-validator".to_string(),
///     public_key: "public".to_string(),
///     private_key: "private".to_string(),
/// };
/// let mut org = Organization::new("acme", "Acme Corp", credentials);
/// assert_eq!(org.clientname(), "acme-validator");
/// assert_eq!(org.guid().len(), 32);
///
/// org.rename("acme2");
/// assert_eq!(org.clientname(), "acme2-validator");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Organization {
    /// Unique lookup name
    pub name: String,

    /// Human-readable display name
    pub full_name: String,

    /// Free-form classification, accepted but never validated
    pub org_type: Option<String>,

    guid: String,
    assigned_at: DateTime<Utc>,
    clientname: String,
    public_key: String,
    private_key: String,
}

impl Organization {
    /// Creates a new organization around freshly generated credentials.
    ///
    /// The organization is created with:
    /// - A newly allocated 32-character guid
    /// - The current time as `assigned_at`
    /// - A validator client name derived from `name`
    pub fn new(
        name: impl Into<String>,
        full_name: impl Into<String>,
        credentials: ValidatorCredentials,
    ) -> Self {
        let name = name.into();
        Self {
            clientname: validator_client_name(&name),
            name,
            full_name: full_name.into(),
            org_type: None,
            guid: new_guid(),
            assigned_at: Utc::now(),
            public_key: credentials.public_key,
            private_key: credentials.private_key,
        }
    }

    /// Set the organization type.
    pub fn with_org_type(mut self, org_type: impl Into<String>) -> Self {
        self.org_type = Some(org_type.into());
        self
    }

    /// Change the lookup name, keeping the validator client name in step.
    pub fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
        self.clientname = validator_client_name(&self.name);
    }

    /// The 32-character guid assigned at creation.
    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// Creation time.
    pub fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    /// Creation time as `YYYY-MM-DD HH:MM:SS +HHMM`.
    pub fn assigned_at_display(&self) -> String {
        self.assigned_at.format(ASSIGNED_AT_FORMAT).to_string()
    }

    /// Validator client name for the current organization name.
    pub fn clientname(&self) -> &str {
        &self.clientname
    }

    /// PEM public key of the validator client.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// PEM private key of the validator client.
    ///
    /// Only the create response ever exposes this value.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Whether `other` is the same logical record (same guid).
    pub fn is_same_record(&self, other: &Organization) -> bool {
        self.guid == other.guid
    }
}

impl std::fmt::Debug for Organization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Organization")
            .field("name", &self.name)
            .field("full_name", &self.full_name)
            .field("org_type", &self.org_type)
            .field("guid", &self.guid)
            .field("assigned_at", &self.assigned_at)
            .field("clientname", &self.clientname)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}
