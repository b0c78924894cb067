//! # Tenancy API
//!
//! HTTP service for the organization resource of the tenancy platform.
//!
//! ## Overview
//!
//! The tenancy-api crate provides:
//! - **Service**: the organization create/read/update/delete lifecycle
//! - **HTTP**: an axum router with bearer-token principals
//! - **Configuration**: environment-driven service settings
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tenancy_api::{router, AppState, ServiceConfig};
//! use tenancy_org::MemoryOrganizationStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::from_env()?;
//! let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
//! let state = AppState::new(config, Arc::new(MemoryOrganizationStore::new()))?;
//! axum::serve(listener, router(state)).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod telemetry;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ApiError, ApiResult};
pub use http::{router, AppState, Authenticated};
pub use service::OrganizationService;
pub use telemetry::init_tracing;
