//! JSON API server for Unicompare
//!
//! Wires the store, admin gate, comparison selection and predictor into one
//! shared state and mounts every endpoint on an axum router.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use parking_lot::Mutex;
use tower_http::cors::CorsLayer;
use tracing::info;
use unicompare_core::{AdminGate, AppConfig, ComparisonSelection, UniversityRepository, UniversityStore};
use unicompare_predict::AdmissionPredictor;

use crate::handlers::{
    admin_delete, admin_login, admin_logout, admin_seed, admin_upsert, admin_upsert_form,
    compare_toggle, compare_view, get_program, get_university, list_universities, predict_admission,
    store_status,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// University catalog
    pub store: Arc<dyn UniversityRepository>,
    /// Admin passcode gate and sessions
    pub admin: Arc<AdminGate>,
    /// Universities selected for comparison, shared by all clients
    pub comparison: Arc<Mutex<ComparisonSelection>>,
    /// Admission prediction chain
    pub predictor: Arc<AdmissionPredictor>,
}

impl AppState {
    /// Assembles state from explicit parts with an empty comparison.
    pub fn new(
        store: Arc<dyn UniversityRepository>,
        admin: AdminGate,
        predictor: AdmissionPredictor,
    ) -> Self {
        Self {
            store,
            admin: Arc::new(admin),
            comparison: Arc::new(Mutex::new(ComparisonSelection::new())),
            predictor: Arc::new(predictor),
        }
    }

    /// Builds state from application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(UniversityStore::from_config(&config.store)),
            AdminGate::new(config.admin.passcode.clone()),
            AdmissionPredictor::from_config(&config.prediction),
        )
    }
}

/// Mounts every API route on a router carrying `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Catalog
        .route("/api/universities", get(list_universities))
        .route("/api/universities/{id}", get(get_university))
        .route(
            "/api/universities/{id}/programs/{program_id}",
            get(get_program),
        )
        .route("/api/universities/{id}/predict", post(predict_admission))
        .route("/api/store/status", get(store_status))
        // Comparison
        .route("/api/compare", get(compare_view))
        .route("/api/compare/{id}", post(compare_toggle))
        // Admin
        .route("/api/admin/login", post(admin_login))
        .route("/api/admin/logout", post(admin_logout))
        .route("/api/admin/universities", post(admin_upsert))
        .route("/api/admin/universities/form", post(admin_upsert_form))
        .route("/api/admin/universities/{id}", delete(admin_delete))
        .route("/api/admin/seed", post(admin_seed))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the API server until it is stopped.
///
/// # Errors
/// - `std::io::Error` - Address could not be bound or the server failed
pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let state = AppState::from_config(&config);
    let addr = config.server.socket_addr();

    info!(
        backend = ?state.store.status(),
        admin_enabled = state.admin.is_configured(),
        prediction_candidates = state.predictor.candidates().len(),
        "Starting Unicompare API"
    );

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Unicompare API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
