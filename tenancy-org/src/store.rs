//! Organization storage
//!
//! This module provides the store abstraction the organization service
//! persists through, and an in-memory implementation.
//!
//! Every mutation on the name→record map is linearizable: create-if-absent
//! checks and inserts in one step, and a rename releases the old name and
//! claims the new one in one step, so concurrent readers never see both
//! names (or neither) resolve for the same record.

use crate::error::{StoreError, StoreResult};
use crate::organization::Organization;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Durable mapping from organization name to record.
#[async_trait]
pub trait OrganizationStore: Send + Sync {
    /// Insert `org` unless its name is already taken.
    ///
    /// Fails with [`StoreError::AlreadyExists`] on collision; never overwrites.
    async fn create_if_absent(&self, org: Organization) -> StoreResult<Organization>;

    /// Fetch an organization by name.
    async fn get(&self, name: &str) -> StoreResult<Organization>;

    /// Names of all live organizations, in no particular order.
    async fn list(&self) -> StoreResult<Vec<String>>;

    /// Replace `expected` with `updated`, provided the store still holds
    /// exactly `expected` under `expected.name`.
    ///
    /// When `updated.name` differs from `expected.name` this is a rename: the
    /// old key stops resolving and the new key starts resolving atomically.
    /// Fails with [`StoreError::NotFound`] when the name no longer holds the
    /// same record, with [`StoreError::Modified`] when the record changed
    /// since `expected` was read, and with [`StoreError::ConflictOnNewName`]
    /// when the new name belongs to a different organization.
    async fn replace(
        &self,
        expected: &Organization,
        updated: Organization,
    ) -> StoreResult<Organization>;

    /// Remove an organization, returning the removed record.
    async fn delete(&self, name: &str) -> StoreResult<Organization>;
}

/// In-memory organization store.
///
/// A single lock guards the whole map, and no mutation awaits while holding
/// it, so an abandoned request leaves the map in its pre- or post-state.
#[derive(Clone, Default)]
pub struct MemoryOrganizationStore {
    organizations: Arc<RwLock<HashMap<String, Organization>>>,
}

impl std::fmt::Debug for MemoryOrganizationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryOrganizationStore").finish_non_exhaustive()
    }
}

impl MemoryOrganizationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live organizations.
    pub async fn len(&self) -> usize {
        self.organizations.read().await.len()
    }

    /// Whether the store holds no organizations.
    pub async fn is_empty(&self) -> bool {
        self.organizations.read().await.is_empty()
    }
}

#[async_trait]
impl OrganizationStore for MemoryOrganizationStore {
    async fn create_if_absent(&self, org: Organization) -> StoreResult<Organization> {
        let mut organizations = self.organizations.write().await;
        if organizations.contains_key(&org.name) {
            return Err(StoreError::AlreadyExists(org.name));
        }
        organizations.insert(org.name.clone(), org.clone());
        tracing::debug!(org = %org.name, guid = %org.guid(), "organization stored");
        Ok(org)
    }

    async fn get(&self, name: &str) -> StoreResult<Organization> {
        self.organizations
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        let organizations = self.organizations.read().await;
        Ok(organizations.keys().cloned().collect())
    }

    async fn replace(
        &self,
        expected: &Organization,
        updated: Organization,
    ) -> StoreResult<Organization> {
        let old_name = expected.name.as_str();
        let mut organizations = self.organizations.write().await;

        match organizations.get(old_name) {
            Some(current) if !current.is_same_record(&updated) => {
                return Err(StoreError::NotFound(old_name.to_string()))
            }
            Some(current) if current != expected => {
                return Err(StoreError::Modified(old_name.to_string()))
            }
            Some(_) => {}
            None => return Err(StoreError::NotFound(old_name.to_string())),
        }

        if updated.name != old_name {
            if organizations.contains_key(&updated.name) {
                return Err(StoreError::ConflictOnNewName(updated.name));
            }
            organizations.remove(old_name);
            tracing::debug!(from = old_name, to = %updated.name, "organization renamed");
        }

        organizations.insert(updated.name.clone(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, name: &str) -> StoreResult<Organization> {
        self.organizations
            .write()
            .await
            .remove(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}
