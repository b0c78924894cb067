//! HTTP surface.
//!
//! | Method | Path                   | Principal  |
//! |--------|------------------------|------------|
//! | GET    | `/organizations`       | any        |
//! | POST   | `/organizations`       | superuser  |
//! | GET    | `/organizations/{name}`| any        |
//! | PUT    | `/organizations/{name}`| superuser  |
//! | DELETE | `/organizations/{name}`| superuser  |
//! | GET    | `/_status`             | none       |

use crate::config::ServiceConfig;
use crate::error::{ApiError, ApiResult};
use crate::service::OrganizationService;
use axum::body::Bytes;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tenancy_auth::{AuthError, JwtConfig, JwtService, Principal, RsaCredentialGenerator};
use tenancy_org::{OrgError, OrganizationStore, Projection, Projector};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OrganizationService>,
    pub jwt: Arc<JwtService>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Wire the production collaborators around `store`.
    pub fn new(config: ServiceConfig, store: Arc<dyn OrganizationStore>) -> Result<Self, AuthError> {
        let jwt = JwtService::new(JwtConfig {
            secret: config.jwt_secret.clone(),
            ..Default::default()
        })?;
        let service = OrganizationService::new(
            store,
            Arc::new(RsaCredentialGenerator::new(config.key_bits)),
            Projector::new(config.backend_mode, config.base_url.clone()),
        );
        Ok(Self::from_parts(service, jwt, config))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(service: OrganizationService, jwt: JwtService, config: ServiceConfig) -> Self {
        Self {
            service: Arc::new(service),
            jwt: Arc::new(jwt),
            config: Arc::new(config),
        }
    }
}

/// Extractor for the calling principal, taken from `Authorization: Bearer`.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = state.jwt.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "bearer token rejected");
            e
        })?;
        Ok(Authenticated(Principal::from(claims)))
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let timeout = state.config.request_timeout();

    Router::new()
        .route(
            "/organizations",
            get(list_organizations).post(create_organization),
        )
        .route(
            "/organizations/{name}",
            get(read_organization)
                .put(update_organization)
                .delete(delete_organization),
        )
        .route("/_status", get(status))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn respond(projection: Projection) -> Response {
    let status = StatusCode::from_u16(projection.status).unwrap_or(StatusCode::OK);
    (status, Json(projection.body)).into_response()
}

fn parse_body(body: &Bytes) -> Result<Value, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| OrgError::Validation(format!("Invalid JSON body: {}", e)).into())
}

fn require_superuser(principal: &Principal) -> Result<(), ApiError> {
    principal.require_superuser().map_err(|e| {
        tracing::warn!(principal = %principal.name, "mutation attempted without superuser");
        ApiError::from(e)
    })
}

async fn list_organizations(
    State(state): State<AppState>,
    Authenticated(_principal): Authenticated,
) -> ApiResult<Response> {
    Ok(respond(state.service.list().await?))
}

async fn read_organization(
    State(state): State<AppState>,
    Authenticated(_principal): Authenticated,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    Ok(respond(state.service.read(&name).await?))
}

async fn create_organization(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    body: Bytes,
) -> ApiResult<Response> {
    require_superuser(&principal)?;
    let payload = parse_body(&body)?;
    Ok(respond(state.service.create(payload).await?))
}

async fn update_organization(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    Path(name): Path<String>,
    body: Bytes,
) -> ApiResult<Response> {
    require_superuser(&principal)?;
    let payload = parse_body(&body)?;
    Ok(respond(state.service.update(&name, payload).await?))
}

async fn delete_organization(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    require_superuser(&principal)?;
    match state.service.delete(&name).await? {
        Some(projection) => Ok(respond(projection)),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "backend_mode": state.config.backend_mode.as_str(),
        "password_reset_url": state.config.password_reset_url(),
    }))
}
