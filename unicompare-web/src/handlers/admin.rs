//! Admin handlers, gated on the `x-admin-token` header

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use unicompare_core::{AdminForm, AdminSession, University};

use crate::errors::ApiError;
use crate::server::AppState;

/// Header carrying the admin session token.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Body of `POST /api/admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Passcode as typed
    pub passcode: String,
}

/// Outcome of a seed request.
#[derive(Debug, Serialize)]
pub struct SeedResult {
    /// False when the remote collection was already populated
    pub seeded: bool,
    /// Number of records the store holds locally
    pub count: usize,
    /// Records the store holds locally
    pub universities: Vec<University>,
}

fn require_admin<'a>(state: &AppState, headers: &'a HeaderMap) -> Result<&'a str, ApiError> {
    let token = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("admin token required".to_string()))?;
    state.admin.verify(token)?;
    Ok(token)
}

/// `POST /api/admin/login`
///
/// # Errors
/// - `ApiError::Unauthorized` - Wrong passcode
/// - `ApiError::Unavailable` - No passcode configured
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AdminSession>, ApiError> {
    Ok(Json(state.admin.authorize(&request.passcode)?))
}

/// `POST /api/admin/logout`
///
/// # Errors
/// - `ApiError::Unauthorized` - Missing or unknown token
pub async fn admin_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = require_admin(&state, &headers)?;
    state.admin.revoke(token);
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/admin/universities`
///
/// # Errors
/// - `ApiError::Unauthorized` - Missing or unknown token
/// - `ApiError::Upstream` - Remote store rejected the write
pub async fn admin_upsert(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(record): Json<University>,
) -> Result<Json<University>, ApiError> {
    require_admin(&state, &headers)?;
    let saved = state.store.upsert(record).await?;
    info!(university = %saved.id, "University saved");
    Ok(Json(saved))
}

/// `POST /api/admin/universities/form`
///
/// # Errors
/// - `ApiError::Unauthorized` - Missing or unknown token
/// - `ApiError::BadRequest` - Form has no name
/// - `ApiError::Upstream` - Remote store rejected the write
pub async fn admin_upsert_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<AdminForm>,
) -> Result<Json<University>, ApiError> {
    require_admin(&state, &headers)?;
    let record = form.into_university()?;
    let saved = state.store.upsert(record).await?;
    info!(university = %saved.id, "University saved from admin form");
    Ok(Json(saved))
}

/// `DELETE /api/admin/universities/{id}`
///
/// # Errors
/// - `ApiError::Unauthorized` - Missing or unknown token
/// - `ApiError::Upstream` - Remote store rejected the delete
pub async fn admin_delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    require_admin(&state, &headers)?;
    state.store.remove(&id).await?;
    info!(university = %id, "University removed");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/admin/seed`
///
/// # Errors
/// - `ApiError::Unauthorized` - Missing or unknown token
/// - `ApiError::Upstream` - Remote store could not be seeded
pub async fn admin_seed(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SeedResult>, ApiError> {
    require_admin(&state, &headers)?;
    let outcome = state.store.seed().await?;
    if !outcome.seeded {
        info!("Seed skipped, remote collection already populated");
    }
    Ok(Json(SeedResult {
        seeded: outcome.seeded,
        count: outcome.universities.len(),
        universities: outcome.universities,
    }))
}
