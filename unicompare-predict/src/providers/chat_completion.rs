//! OpenAI-compatible chat completion provider (Groq, OpenAI).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PredictionProvider;
use crate::errors::PredictionError;
use crate::types::Prediction;

/// Groq chat completion endpoint.
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
/// OpenAI chat completion endpoint.
pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
/// Groq models, in the order they are tried.
pub const GROQ_MODELS: [&str; 4] = [
    "llama-3.1-8b-instant",
    "llama-3.3-70b-versatile",
    "mixtral-8x7b-32768",
    "gemma2-9b-it",
];
/// OpenAI model used after the Groq models.
pub const OPENAI_MODEL: &str = "gpt-3.5-turbo";

const TEMPERATURE: f32 = 0.7;

/// One model on an OpenAI-compatible `chat/completions` endpoint.
#[derive(Debug)]
pub struct ChatCompletionProvider {
    client: reqwest::Client,
    name: String,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl ChatCompletionProvider {
    /// Create a provider for `model` on an arbitrary compatible endpoint.
    pub fn with_endpoint(
        label: &str,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let model = model.into();
        Self {
            client: reqwest::Client::new(),
            name: format!("{label}/{model}"),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model,
        }
    }

    /// Groq candidate for `model`.
    pub fn groq(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_endpoint("groq", GROQ_ENDPOINT, api_key, model)
    }

    /// OpenAI candidate for `model`.
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_endpoint("openai", OPENAI_ENDPOINT, api_key, model)
    }

    /// Model requested from the endpoint.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl PredictionProvider for ChatCompletionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn predict(&self, prompt: &str) -> Result<Prediction, PredictionError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        debug!(provider = %self.name, "Requesting chat completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
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

        let reply: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| PredictionError::MalformedResponse {
                    provider: self.name.clone(),
                    reason: format!("unreadable completion: {e}"),
                })?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PredictionError::MalformedResponse {
                provider: self.name.clone(),
                reason: "no response content".to_string(),
            })?;

        Prediction::from_json(&content, &self.name)
    }
}
