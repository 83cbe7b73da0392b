//! Unicompare Core - University catalog and record store
//!
//! This crate provides the building blocks shared by the web server and the
//! CLI: the university data model, the filter engine, the dual-backend
//! record store, the comparison selection, the admin gate, and configuration.

pub mod admin;
pub mod compare;
pub mod config;
pub mod filter;
pub mod model;
pub mod sample;
pub mod store;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use admin::{AdminError, AdminForm, AdminGate, AdminSession};
pub use compare::{ComparisonRow, ComparisonSelection, ComparisonTable};
pub use config::{AppConfig, ConfigError};
pub use filter::{FilterSpec, apply_filter};
pub use model::{Admissions, Cooperation, Program, University};
pub use store::{BackendStatus, SeedOutcome, StoreError, UniversityRepository, UniversityStore};

/// Core errors that can bubble up from any Unicompare subsystem.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Admin error: {0}")]
    Admin(#[from] AdminError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("University not found: {id}")]
    UniversityNotFound { id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Store(e) => match e {
                StoreError::WriteFailed { id, .. } => {
                    format!("Failed to save university {id}. Please try again.")
                }
                StoreError::DeleteFailed { id, .. } => {
                    format!("Failed to delete university {id}. Please try again.")
                }
                _ => "Could not reach the university store".to_string(),
            },
            CatalogError::Admin(AdminError::PasscodeNotConfigured) => {
                "Admin passcode not configured".to_string()
            }
            CatalogError::Admin(AdminError::IncorrectPasscode) => {
                "Incorrect password. Please try again.".to_string()
            }
            CatalogError::Admin(e) => e.to_string(),
            CatalogError::Configuration(e) => format!("Configuration problem: {e}"),
            CatalogError::UniversityNotFound { id } => format!("University {id} not found"),
            CatalogError::Io(_) => "File system error occurred".to_string(),
        }
    }
}

/// Convenience type alias for Results with CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;
