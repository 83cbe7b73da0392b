//! Error types for admission prediction.

use thiserror::Error;

/// Errors that can occur while requesting a prediction.
///
/// Every variant except the configuration ones is recoverable inside the
/// provider chain: the next candidate is tried.
#[derive(Debug, Clone, Error)]
pub enum PredictionError {
    /// No provider is usable with the current configuration.
    #[error("Prediction not configured: {reason}")]
    NotConfigured {
        /// What is missing
        reason: String,
    },

    /// A configured API key has the wrong shape.
    #[error("Invalid API key for {provider}: {reason}")]
    InvalidApiKey {
        /// Provider family the key belongs to
        provider: String,
        /// Why the key was rejected
        reason: String,
    },

    /// Provider could not be reached.
    #[error("Network error ({provider}): {reason}")]
    NetworkError {
        /// Provider candidate that failed
        provider: String,
        /// The reason for the network error
        reason: String,
    },

    /// Provider answered with a non-success status.
    #[error("{provider} API error: {status} - {body}")]
    HttpStatus {
        /// Provider candidate that failed
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// Provider answered but not with a usable prediction.
    #[error("Invalid response format from {provider}: {reason}")]
    MalformedResponse {
        /// Provider candidate that failed
        provider: String,
        /// What was wrong with the response
        reason: String,
    },
}

impl PredictionError {
    /// True for errors raised before any provider was contacted.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PredictionError::NotConfigured { .. } | PredictionError::InvalidApiKey { .. }
        )
    }
}
