//! Catalog browsing handlers

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Serialize;
use unicompare_core::{BackendStatus, FilterSpec, Program, University};

use crate::errors::ApiError;
use crate::server::AppState;

/// Program detail together with its owning university.
#[derive(Debug, Serialize)]
pub struct ProgramDetail {
    /// Owning university
    pub university: University,
    /// Requested program
    pub program: Program,
}

/// `GET /api/universities?search=&city=&program=`
pub async fn list_universities(
    State(state): State<AppState>,
    Query(filter): Query<FilterSpec>,
) -> Json<Vec<University>> {
    Json(state.store.list(&filter).await)
}

/// `GET /api/universities/{id}`
///
/// # Errors
/// - `ApiError::NotFound` - No university with this id
pub async fn get_university(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<University>, ApiError> {
    state
        .store
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::university_not_found(&id))
}

/// `GET /api/universities/{id}/programs/{program_id}`
///
/// # Errors
/// - `ApiError::NotFound` - Unknown university or program
pub async fn get_program(
    State(state): State<AppState>,
    Path((id, program_id)): Path<(String, String)>,
) -> Result<Json<ProgramDetail>, ApiError> {
    let (university, program) = state
        .store
        .program(&id, &program_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Program {program_id} not found at {id}")))?;

    Ok(Json(ProgramDetail {
        university,
        program,
    }))
}

/// `GET /api/store/status`
pub async fn store_status(State(state): State<AppState>) -> Json<BackendStatus> {
    Json(state.store.status())
}
