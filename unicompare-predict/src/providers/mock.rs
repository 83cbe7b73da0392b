//! Scripted provider for testing.

#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use super::PredictionProvider;
#[cfg(test)]
use crate::errors::PredictionError;
#[cfg(test)]
use crate::types::Prediction;

/// Provider that answers every call with the same scripted reply.
#[cfg(test)]
#[derive(Debug)]
pub struct ScriptedProvider {
    name: String,
    reply: Result<String, u16>,
    calls: Arc<AtomicUsize>,
}

#[cfg(test)]
impl ScriptedProvider {
    /// Replies with `text` as the model output.
    pub fn replying(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            reply: Ok(text.to_string()),
            calls: Arc::default(),
        }
    }

    /// Fails every call with HTTP `status`.
    pub fn failing(name: &str, status: u16) -> Self {
        Self {
            name: name.to_string(),
            reply: Err(status),
            calls: Arc::default(),
        }
    }

    /// Shared counter of calls made to this provider.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[cfg(test)]
#[async_trait]
impl PredictionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn predict(&self, _prompt: &str) -> Result<Prediction, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Prediction::from_json(text, &self.name),
            Err(status) => Err(PredictionError::HttpStatus {
                provider: self.name.clone(),
                status: *status,
                body: "scripted failure".to_string(),
            }),
        }
    }
}
