//! Organization name validation
//!
//! The exact name grammar belongs to whoever deploys the service, so it sits
//! behind the [`NameValidator`] trait. [`UrlSafeNameValidator`] only checks
//! that a name can be used as a single URL path segment.

use crate::error::{OrgError, OrgResult};

/// Decides whether a string is acceptable as an organization name.
pub trait NameValidator: Send + Sync {
    /// Validate a proposed organization name.
    fn validate(&self, name: &str) -> OrgResult<()>;
}

/// Accepts non-empty names made of unreserved URI characters
/// (`A-Z a-z 0-9 - _ . ~`), excluding the dot segments `.` and `..`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlSafeNameValidator;

impl NameValidator for UrlSafeNameValidator {
    fn validate(&self, name: &str) -> OrgResult<()> {
        if name.is_empty() {
            return Err(OrgError::Validation(
                "Field 'name' must not be empty".to_string(),
            ));
        }
        if name == "." || name == ".." {
            return Err(OrgError::Validation(format!(
                "Invalid organization name '{}'",
                name
            )));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')))
        {
            return Err(OrgError::Validation(format!(
                "Invalid character '{}' in organization name '{}'",
                bad, name
            )));
        }
        Ok(())
    }
}
