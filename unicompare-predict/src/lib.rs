//! Unicompare Predict - Admission-chance estimates

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
//!
//! Sends a student's academic profile to language-model providers and
//! returns a clamped admission percentage with an explanation. Providers are
//! tried in order; the first structurally valid answer wins.

pub mod errors;
pub mod prompt;
pub mod providers;
pub mod service;
pub mod types;

// Re-export main types
pub use errors::PredictionError;
pub use providers::{ChatCompletionProvider, GeminiProvider, PredictionProvider};
pub use service::AdmissionPredictor;
pub use types::{AdmissionProfile, Prediction};

/// Convenience type alias for Results with PredictionError.
pub type Result<T> = std::result::Result<T, PredictionError>;
