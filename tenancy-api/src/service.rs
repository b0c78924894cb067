//! Organization resource service.
//!
//! Implements the create/read/update/delete lifecycle on top of an
//! [`OrganizationStore`], generating validator credentials on create and
//! delegating response shaping to the [`Projector`].
//!
//! ```text
//!            create                 update
//!   absent ─────────→ present ─────────────→ present
//!      ↑                 │
//!      └──── delete ─────┘
//! ```

use serde_json::{Map, Value};
use std::sync::Arc;
use tenancy_auth::CredentialGenerator;
use tenancy_org::{
    NameValidator, OrgError, OrgResult, Organization, OrganizationStore, Projection, Projector,
    StoreError, UrlSafeNameValidator,
};

/// Read-apply-replace rounds an update gets before giving up.
const MAX_UPDATE_ATTEMPTS: u32 = 5;

/// Orchestrates validation, credential generation, storage and projection.
pub struct OrganizationService {
    store: Arc<dyn OrganizationStore>,
    credentials: Arc<dyn CredentialGenerator>,
    names: Arc<dyn NameValidator>,
    projector: Projector,
}

impl std::fmt::Debug for OrganizationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrganizationService")
            .field("projector", &self.projector)
            .finish_non_exhaustive()
    }
}

impl OrganizationService {
    /// Create a service using the URL-safe name validator.
    pub fn new(
        store: Arc<dyn OrganizationStore>,
        credentials: Arc<dyn CredentialGenerator>,
        projector: Projector,
    ) -> Self {
        Self {
            store,
            credentials,
            names: Arc::new(UrlSafeNameValidator),
            projector,
        }
    }

    /// Replace the organization name validator.
    pub fn with_name_validator(mut self, names: Arc<dyn NameValidator>) -> Self {
        self.names = names;
        self
    }

    /// The projector responses are shaped with.
    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// `GET /organizations`
    pub async fn list(&self) -> OrgResult<Projection> {
        let names = self.store.list().await.map_err(log_store_error)?;
        Ok(self.projector.list(names))
    }

    /// `GET /organizations/:name`
    pub async fn read(&self, name: &str) -> OrgResult<Projection> {
        let org = self.store.get(name).await.map_err(log_store_error)?;
        Ok(self.projector.read(&org))
    }

    /// `POST /organizations`
    ///
    /// Keys are generated on a blocking worker before the store is touched,
    /// so slow key generation never holds up unrelated writes.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, payload: Value) -> OrgResult<Projection> {
        let fields = as_object(&payload)?;
        let name = required_string(fields, "name")?;
        self.names.validate(name)?;
        let full_name = required_string(fields, "full_name")?;
        let org_type = optional_string(fields, "org_type")?;

        let generator = Arc::clone(&self.credentials);
        let org_name = name.to_string();
        let credentials = tokio::task::spawn_blocking(move || generator.generate(&org_name))
            .await
            .map_err(|e| OrgError::Credential(format!("key generation task failed: {}", e)))?
            .map_err(|e| {
                tracing::error!(org = name, error = %e, "validator key generation failed");
                OrgError::Credential(e.to_string())
            })?;

        let mut org = Organization::new(name, full_name, credentials);
        org.org_type = org_type.map(str::to_string);

        let org = self.store.create_if_absent(org).await.map_err(|e| {
            if let StoreError::AlreadyExists(ref existing) = e {
                tracing::info!(org = %existing, "organization create rejected: name taken");
            }
            log_store_error(e)
        })?;

        tracing::info!(org = %org.name, guid = %org.guid(), "organization created");
        Ok(self.projector.created(&org, fields))
    }

    /// `PUT /organizations/:name`
    ///
    /// A payload carrying `private_key` is refused before anything else is
    /// looked at; key material can only be set at creation.
    ///
    /// The payload is applied to a snapshot and written back only if the
    /// stored record still equals that snapshot. Losing that race re-reads
    /// and re-applies, so concurrent updates of different fields all land.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, name: &str, payload: Value) -> OrgResult<Projection> {
        if payload
            .as_object()
            .is_some_and(|fields| fields.contains_key("private_key"))
        {
            tracing::warn!(org = name, "rejected private_key update");
            return Err(OrgError::KeyUpdateForbidden);
        }

        let fields = as_object(&payload)?;
        let new_name = optional_string(fields, "name")?;
        if let Some(new_name) = new_name {
            self.names.validate(new_name)?;
        }
        let full_name = optional_string(fields, "full_name")?;
        let org_type = optional_string(fields, "org_type")?;

        let mut attempt = 1;
        let stored = loop {
            let current = self.store.get(name).await.map_err(log_store_error)?;
            let mut updated = current.clone();
            if let Some(full_name) = full_name {
                updated.full_name = full_name.to_string();
            }
            if let Some(org_type) = org_type {
                updated.org_type = Some(org_type.to_string());
            }
            if let Some(new_name) = new_name.filter(|n| *n != name) {
                updated.rename(new_name);
            }

            match self.store.replace(&current, updated).await {
                Ok(stored) => break stored,
                Err(StoreError::Modified(_)) if attempt < MAX_UPDATE_ATTEMPTS => {
                    tracing::debug!(
                        org = name,
                        attempt,
                        "organization changed underneath update, retrying"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(log_store_error(e)),
            }
        };

        if stored.name != name {
            tracing::info!(from = name, to = %stored.name, "organization renamed");
        } else {
            tracing::info!(org = name, "organization updated");
        }
        Ok(self.projector.updated(&stored, &payload))
    }

    /// `DELETE /organizations/:name`
    ///
    /// Returns `None` when nothing was stored under `name`.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> OrgResult<Option<Projection>> {
        match self.store.delete(name).await {
            Ok(org) => {
                tracing::info!(org = name, guid = %org.guid(), "organization deleted");
                Ok(Some(self.projector.deleted(&org)))
            }
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(org = name, "delete of absent organization");
                Ok(None)
            }
            Err(e) => Err(log_store_error(e)),
        }
    }
}

fn log_store_error(err: StoreError) -> OrgError {
    if err.is_retryable() {
        tracing::error!(error = %err, "organization store unavailable");
    }
    err.into()
}

fn as_object(payload: &Value) -> OrgResult<&Map<String, Value>> {
    payload
        .as_object()
        .ok_or_else(|| OrgError::Validation("Request body must be a JSON object".to_string()))
}

fn required_string<'a>(fields: &'a Map<String, Value>, key: &str) -> OrgResult<&'a str> {
    optional_string(fields, key)?
        .ok_or_else(|| OrgError::Validation(format!("Field '{}' missing", key)))
}

fn optional_string<'a>(fields: &'a Map<String, Value>, key: &str) -> OrgResult<Option<&'a str>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(OrgError::Validation(format!(
            "Field '{}' must be a string",
            key
        ))),
    }
}
