//! Response shaping for the two backend conventions
//!
//! The organizations API historically shipped from two backends that shaped
//! their responses differently. Every mode-dependent decision lives here so
//! the service itself never branches on [`BackendMode`].
//!
//! | Shape  | ruby                                   | erlang                                    |
//! |--------|----------------------------------------|-------------------------------------------|
//! | read   | `name`, `full_name`, `guid`, `assigned_at` | `name`, `full_name`                   |
//! | create | `uri`, `clientname`, `private_key`     | submitted payload + `uri`, `clientname`, `private_key` |
//! | update | 200 `{uri}`                            | 201 with the submitted payload            |
//!
//! Projection is a pure function of its inputs; `serde_json` maps are
//! ordered, so projecting the same record twice yields identical bytes.

use crate::organization::Organization;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Response convention selected at deployment time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Minimal, URI-oriented responses
    #[default]
    Ruby,
    /// Responses echo the submitted payload
    Erlang,
}

impl BackendMode {
    /// Get the mode as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Ruby => "ruby",
            BackendMode::Erlang => "erlang",
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ruby" | "ruby-style" => Ok(BackendMode::Ruby),
            "erlang" | "erlang-style" => Ok(BackendMode::Erlang),
            other => Err(format!("unknown backend mode '{}'", other)),
        }
    }
}

/// A status code and JSON body ready to be written to the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// HTTP status code
    pub status: u16,
    /// Response document
    pub body: Value,
}

impl Projection {
    fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

/// Maps organization records to response documents.
#[derive(Debug, Clone)]
pub struct Projector {
    mode: BackendMode,
    base_url: String,
}

impl Projector {
    /// Create a projector for `mode`, building URIs under `base_url`.
    pub fn new(mode: BackendMode, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { mode, base_url }
    }

    /// The configured backend mode.
    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    /// Canonical URI of an organization.
    pub fn organization_uri(&self, name: &str) -> String {
        format!("{}/organizations/{}", self.base_url, name)
    }

    /// `{name: uri}` for every listed organization.
    pub fn list<I, S>(&self, names: I) -> Projection
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let body: Map<String, Value> = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                (name.to_string(), Value::String(self.organization_uri(name)))
            })
            .collect();
        Projection::new(200, Value::Object(body))
    }

    /// Read shape of a stored organization.
    pub fn read(&self, org: &Organization) -> Projection {
        let mut body = Map::new();
        body.insert("name".into(), Value::String(org.name.clone()));
        body.insert("full_name".into(), Value::String(org.full_name.clone()));
        if self.mode == BackendMode::Ruby {
            body.insert("guid".into(), Value::String(org.guid().to_string()));
            body.insert(
                "assigned_at".into(),
                Value::String(org.assigned_at_display()),
            );
        }
        Projection::new(200, Value::Object(body))
    }

    /// Create shape; the only projection that carries the private key.
    pub fn created(&self, org: &Organization, payload: &Map<String, Value>) -> Projection {
        let mut body = match self.mode {
            BackendMode::Ruby => Map::new(),
            BackendMode::Erlang => payload.clone(),
        };
        body.insert("uri".into(), Value::String(self.organization_uri(&org.name)));
        body.insert("clientname".into(), Value::String(org.clientname().to_string()));
        body.insert("private_key".into(), Value::String(org.private_key().to_string()));
        Projection::new(201, Value::Object(body))
    }

    /// Update shape.
    ///
    /// The erlang convention answers 201 with the submitted payload rather
    /// than the stored record; clients depend on that, so it is kept.
    pub fn updated(&self, org: &Organization, payload: &Value) -> Projection {
        match self.mode {
            BackendMode::Ruby => {
                let mut body = Map::new();
                body.insert("uri".into(), Value::String(self.organization_uri(&org.name)));
                Projection::new(200, Value::Object(body))
            }
            BackendMode::Erlang => Projection::new(201, payload.clone()),
        }
    }

    /// Delete shape: the read shape of the removed record.
    pub fn deleted(&self, org: &Organization) -> Projection {
        self.read(org)
    }
}
