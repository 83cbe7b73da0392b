//! Admission prediction handler

use axum::extract::{Path, State};
use axum::response::Json;
use unicompare_predict::{AdmissionProfile, Prediction};

use crate::errors::ApiError;
use crate::server::AppState;

/// `POST /api/universities/{id}/predict`
///
/// # Errors
/// - `ApiError::NotFound` - No university with this id
/// - `ApiError::Unavailable` - No prediction provider configured
/// - `ApiError::Upstream` - Every provider failed
pub async fn predict_admission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(profile): Json<AdmissionProfile>,
) -> Result<Json<Prediction>, ApiError> {
    let university = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::university_not_found(&id))?;

    let prediction = state.predictor.predict(&university, &profile).await?;
    Ok(Json(prediction))
}
