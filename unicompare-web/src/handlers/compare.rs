//! Comparison selection handlers

use axum::extract::{Path, State};
use axum::response::Json;
use serde::Serialize;
use unicompare_core::{ComparisonSelection, ComparisonTable, FilterSpec};

use crate::errors::ApiError;
use crate::server::AppState;

/// Current selection and the table projected from it.
#[derive(Debug, Serialize)]
pub struct ComparisonView {
    /// Selected ids, oldest first
    pub selected: Vec<String>,
    /// Side-by-side table for the selection
    pub table: ComparisonTable,
}

/// Result of toggling one university.
#[derive(Debug, Serialize)]
pub struct ToggleResult {
    /// Whether the university is selected after the toggle
    pub selected: bool,
    /// Selected ids, oldest first
    pub ids: Vec<String>,
}

/// `GET /api/compare`
pub async fn compare_view(State(state): State<AppState>) -> Json<ComparisonView> {
    let catalog = state.store.list(&FilterSpec::default()).await;
    let selection = state.comparison.lock().clone();

    Json(ComparisonView {
        selected: selection.ids().to_vec(),
        table: ComparisonTable::for_selection(&selection, &catalog),
    })
}

/// `POST /api/compare/{id}`
///
/// # Errors
/// - `ApiError::NotFound` - No university with this id
pub async fn compare_toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResult>, ApiError> {
    let already_selected = state.comparison.lock().contains(&id);
    if !already_selected && state.store.get(&id).await.is_none() {
        return Err(ApiError::university_not_found(&id));
    }

    let mut selection = state.comparison.lock();
    let selected = toggle_from(&mut selection, &id, already_selected);
    tracing::debug!(university = %id, selected, count = selection.len(), "Comparison toggled");

    Ok(Json(ToggleResult {
        selected,
        ids: selection.ids().to_vec(),
    }))
}

/// Flips `id` away from `was_selected`, the state observed before the lock
/// was released. Leaves the selection alone if another request already did.
fn toggle_from(selection: &mut ComparisonSelection, id: &str, was_selected: bool) -> bool {
    if selection.contains(id) != was_selected {
        return !was_selected;
    }
    selection.toggle(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_from_observed_state() {
        let mut selection = ComparisonSelection::new();
        assert!(toggle_from(&mut selection, "nu", false));
        assert_eq!(selection.ids(), ["nu"]);

        // A second add that raced the first must not remove it.
        assert!(toggle_from(&mut selection, "nu", false));
        assert_eq!(selection.ids(), ["nu"]);

        assert!(!toggle_from(&mut selection, "nu", true));
        assert!(selection.is_empty());

        // Likewise a racing remove of an id that is already gone.
        assert!(!toggle_from(&mut selection, "nu", true));
        assert!(selection.is_empty());
    }
}
