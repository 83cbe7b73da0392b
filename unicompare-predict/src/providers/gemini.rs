//! Google Gemini `generateContent` provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PredictionProvider;
use crate::errors::PredictionError;
use crate::types::Prediction;

/// Base URL of the Generative Language API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Gemini candidates as `(api version, model)`, in the order they are tried.
pub const GEMINI_MODELS: [(&str, &str); 4] = [
    ("v1", "gemini-1.5-flash-latest"),
    ("v1", "gemini-1.5-pro-latest"),
    ("v1beta", "gemini-1.5-flash"),
    ("v1beta", "gemini-1.5-pro"),
];
/// Prefix every Gemini API key carries.
pub const GEMINI_KEY_PREFIX: &str = "AIza";

/// One Gemini model on one API version.
#[derive(Debug)]
pub struct GeminiProvider {
    client: reqwest::Client,
    name: String,
    base_url: String,
    api_version: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiProvider {
    /// Gemini candidate against the public API.
    ///
    /// # Errors
    /// - `PredictionError::InvalidApiKey` - Key does not start with `AIza`
    pub fn new(
        api_key: impl Into<String>,
        api_version: &str,
        model: &str,
    ) -> Result<Self, PredictionError> {
        Self::with_base_url(GEMINI_BASE_URL, api_key, api_version, model)
    }

    /// Gemini candidate against a custom base URL.
    ///
    /// # Errors
    /// - `PredictionError::InvalidApiKey` - Key does not start with `AIza`
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_version: &str,
        model: &str,
    ) -> Result<Self, PredictionError> {
        let api_key = api_key.into();
        validate_key(&api_key)?;

        Ok(Self {
            client: reqwest::Client::new(),
            name: format!("gemini/{api_version}/{model}"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version: api_version.to_string(),
            model: model.to_string(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, self.api_version, self.model
        )
    }
}

/// Checks the shape of a Gemini API key.
///
/// # Errors
/// - `PredictionError::InvalidApiKey` - Key does not start with `AIza`
pub fn validate_key(api_key: &str) -> Result<(), PredictionError> {
    if api_key.trim().starts_with(GEMINI_KEY_PREFIX) {
        Ok(())
    } else {
        Err(PredictionError::InvalidApiKey {
            provider: "gemini".to_string(),
            reason: format!("Gemini API keys start with \"{GEMINI_KEY_PREFIX}\""),
        })
    }
}

#[async_trait]
impl PredictionProvider for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn predict(&self, prompt: &str) -> Result<Prediction, PredictionError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        debug!(provider = %self.name, "Requesting Gemini content");

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| PredictionError::NetworkError {
                provider: self.name.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PredictionError::HttpStatus {
                provider: self.name.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| PredictionError::MalformedResponse {
                    provider: self.name.clone(),
                    reason: format!("unreadable Gemini reply: {e}"),
                })?;

        let text = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| PredictionError::MalformedResponse {
                provider: self.name.clone(),
                reason: "no response text".to_string(),
            })?;

        Prediction::from_embedded_json(&text, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefix_is_enforced() {
        assert!(GeminiProvider::new("AIzaSyExample", "v1", "gemini-1.5-flash-latest").is_ok());

        let err = GeminiProvider::new("sk-not-gemini", "v1", "gemini-1.5-flash-latest").unwrap_err();
        assert!(matches!(err, PredictionError::InvalidApiKey { .. }));
    }

    #[test]
    fn test_endpoint_url() {
        let provider =
            GeminiProvider::with_base_url("http://localhost:9000/", "AIzaX", "v1beta", "gemini-1.5-pro")
                .unwrap();
        assert_eq!(
            provider.url(),
            "http://localhost:9000/v1beta/models/gemini-1.5-pro:generateContent"
        );
        assert_eq!(provider.name(), "gemini/v1beta/gemini-1.5-pro");
    }
}
