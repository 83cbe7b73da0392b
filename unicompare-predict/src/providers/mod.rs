//! Provider implementations for admission prediction.

use async_trait::async_trait;

use crate::errors::PredictionError;
use crate::types::Prediction;

pub mod chat_completion;
pub mod gemini;
pub mod mock;

pub use chat_completion::ChatCompletionProvider;
pub use gemini::GeminiProvider;
#[cfg(test)]
pub use mock::ScriptedProvider;

/// Trait for admission-prediction providers.
///
/// Each implementation is a single candidate in the chain: one endpoint and
/// one model. A reply counts as success only when it parses into a
/// [`Prediction`].
#[async_trait]
pub trait PredictionProvider: Send + Sync + std::fmt::Debug {
    /// Name used in logs and in the returned prediction, e.g.
    /// `groq/llama-3.1-8b-instant`.
    fn name(&self) -> &str;

    /// Send `prompt` and parse the reply.
    ///
    /// # Errors
    /// - `PredictionError::NetworkError` - Provider unreachable
    /// - `PredictionError::HttpStatus` - Non-success status code
    /// - `PredictionError::MalformedResponse` - Reply lacks a usable prediction
    async fn predict(&self, prompt: &str) -> Result<Prediction, PredictionError>;
}
