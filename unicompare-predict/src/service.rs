//! Admission prediction over a prioritized provider chain.

use tracing::{info, warn};
use unicompare_core::University;
use unicompare_core::config::PredictionConfig;

use crate::errors::PredictionError;
use crate::prompt::build_prompt;
use crate::providers::chat_completion::{GROQ_MODELS, OPENAI_MODEL};
use crate::providers::gemini::{GEMINI_MODELS, validate_key};
use crate::providers::{ChatCompletionProvider, GeminiProvider, PredictionProvider};
use crate::types::{AdmissionProfile, Prediction};

/// Tries each provider in order and returns the first valid prediction.
///
/// Configuration problems do not fail construction; they surface on the
/// first call to [`AdmissionPredictor::predict`].
#[derive(Debug)]
pub struct AdmissionPredictor {
    providers: Vec<Box<dyn PredictionProvider>>,
    setup_error: Option<PredictionError>,
}

impl AdmissionPredictor {
    /// Builds the candidate chain from configured keys: every Groq model,
    /// then OpenAI, then every Gemini model.
    pub fn from_config(config: &PredictionConfig) -> Self {
        let mut providers: Vec<Box<dyn PredictionProvider>> = Vec::new();
        let mut setup_error = None;

        if let Some(key) = &config.groq_api_key {
            for model in GROQ_MODELS {
                providers.push(Box::new(ChatCompletionProvider::groq(key.clone(), model)));
            }
        }

        if let Some(key) = &config.openai_api_key {
            providers.push(Box::new(ChatCompletionProvider::openai(
                key.clone(),
                OPENAI_MODEL,
            )));
        }

        if let Some(key) = &config.gemini_api_key {
            match validate_key(key) {
                Ok(()) => {
                    for (version, model) in GEMINI_MODELS {
                        match GeminiProvider::new(key.clone(), version, model) {
                            Ok(provider) => providers.push(Box::new(provider)),
                            Err(e) => setup_error = Some(e),
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Skipping Gemini candidates");
                    setup_error = Some(e);
                }
            }
        }

        if providers.is_empty() && setup_error.is_none() {
            setup_error = Some(PredictionError::NotConfigured {
                reason: "API key not configured. Set GROQ_API_KEY, OPENAI_API_KEY or GEMINI_API_KEY"
                    .to_string(),
            });
        }

        info!(candidates = providers.len(), "Admission predictor ready");
        Self {
            providers,
            setup_error,
        }
    }

    /// Builds a predictor over an explicit candidate list.
    pub fn with_providers(providers: Vec<Box<dyn PredictionProvider>>) -> Self {
        Self {
            providers,
            setup_error: None,
        }
    }

    /// Names of the candidates, in the order they are tried.
    pub fn candidates(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// True when at least one candidate is available.
    pub fn is_available(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Predicts the admission chance of `profile` at `university`.
    ///
    /// # Errors
    /// - `PredictionError::NotConfigured` - No candidate is configured
    /// - `PredictionError::InvalidApiKey` - The only configured key was rejected
    /// - Any provider error - The last candidate's failure once all have failed
    pub async fn predict(
        &self,
        university: &University,
        profile: &AdmissionProfile,
    ) -> Result<Prediction, PredictionError> {
        let prompt = build_prompt(university, profile);
        self.predict_prompt(&prompt).await
    }

    /// Sends a prebuilt prompt through the chain.
    ///
    /// # Errors
    /// Same as [`AdmissionPredictor::predict`].
    pub async fn predict_prompt(&self, prompt: &str) -> Result<Prediction, PredictionError> {
        let mut last_error = None;

        for provider in &self.providers {
            match provider.predict(prompt).await {
                Ok(prediction) => {
                    info!(
                        provider = provider.name(),
                        chance = prediction.chance,
                        "Admission prediction succeeded"
                    );
                    return Ok(prediction);
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "Prediction candidate failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .or_else(|| self.setup_error.clone())
            .unwrap_or_else(|| PredictionError::NotConfigured {
                reason: "no prediction providers".to_string(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::providers::ScriptedProvider;

    fn config(groq: Option<&str>, openai: Option<&str>, gemini: Option<&str>) -> PredictionConfig {
        PredictionConfig {
            groq_api_key: groq.map(str::to_string),
            openai_api_key: openai.map(str::to_string),
            gemini_api_key: gemini.map(str::to_string),
        }
    }

    #[test]
    fn test_chain_order_from_config() {
        let predictor = AdmissionPredictor::from_config(&config(Some("gsk"), Some("sk"), Some("AIzaK")));
        let names = predictor.candidates();

        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "groq/llama-3.1-8b-instant");
        assert_eq!(names[3], "groq/gemma2-9b-it");
        assert_eq!(names[4], "openai/gpt-3.5-turbo");
        assert_eq!(names[5], "gemini/v1/gemini-1.5-flash-latest");
        assert_eq!(names[8], "gemini/v1beta/gemini-1.5-pro");
    }

    #[tokio::test]
    async fn test_missing_keys_error_on_first_use() {
        let predictor = AdmissionPredictor::from_config(&config(None, None, None));
        assert!(!predictor.is_available());

        let err = predictor.predict_prompt("p").await.unwrap_err();
        assert!(matches!(err, PredictionError::NotConfigured { .. }));
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_bad_gemini_key_only_blocks_gemini() {
        let alone = AdmissionPredictor::from_config(&config(None, None, Some("bogus")));
        let err = alone.predict_prompt("p").await.unwrap_err();
        assert!(matches!(err, PredictionError::InvalidApiKey { .. }));

        let with_groq = AdmissionPredictor::from_config(&config(Some("gsk"), None, Some("bogus")));
        assert_eq!(with_groq.candidates().len(), 4);
    }

    #[tokio::test]
    async fn test_first_valid_answer_wins() {
        let broken = ScriptedProvider::failing("broken", 500);
        let garbled = ScriptedProvider::replying("garbled", "I think you have a good chance");
        let good = ScriptedProvider::replying("good", r#"{"chance": 150, "explanation": "Excellent"}"#);
        let unused = ScriptedProvider::replying("unused", r#"{"chance": 1, "explanation": "x"}"#);
        let unused_calls = unused.calls();

        let predictor = AdmissionPredictor::with_providers(vec![
            Box::new(broken),
            Box::new(garbled),
            Box::new(good),
            Box::new(unused),
        ]);

        let prediction = predictor.predict_prompt("p").await.unwrap();
        assert_eq!(prediction.chance, 100.0);
        assert_eq!(prediction.provider, "good");
        assert_eq!(unused_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_last_error_is_surfaced() {
        let predictor = AdmissionPredictor::with_providers(vec![
            Box::new(ScriptedProvider::failing("first", 500)),
            Box::new(ScriptedProvider::replying("second", r#"{"chance": 40}"#)),
        ]);

        match predictor.predict_prompt("p").await.unwrap_err() {
            PredictionError::MalformedResponse { provider, .. } => assert_eq!(provider, "second"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
