//! Data types for admission prediction.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::PredictionError;

static JSON_OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid json object regex"));

/// Student profile submitted for a prediction. Scores are free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdmissionProfile {
    /// Grade point average
    pub gpa: String,
    /// Unified National Testing score
    pub unt_score: String,
    /// IELTS band
    pub ielts: String,
    /// SAT score
    pub sat: String,
    /// Yearly budget
    pub budget: String,
    /// Program title the student is applying to
    pub program: Option<String>,
}

/// Admission estimate returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Admission chance in percent, within `[0, 100]`
    pub chance: f64,
    /// Provider's reasoning
    pub explanation: String,
    /// Provider candidate that produced the estimate
    pub provider: String,
}

impl Prediction {
    /// Parses a provider reply that must be exactly one JSON object.
    ///
    /// # Errors
    /// - `PredictionError::MalformedResponse` - Not JSON, or required fields missing
    pub fn from_json(text: &str, provider: &str) -> Result<Self, PredictionError> {
        let value: serde_json::Value =
            serde_json::from_str(text.trim()).map_err(|e| PredictionError::MalformedResponse {
                provider: provider.to_string(),
                reason: format!("reply is not JSON: {e}"),
            })?;
        let object = value
            .as_object()
            .ok_or_else(|| PredictionError::MalformedResponse {
                provider: provider.to_string(),
                reason: "reply is not a JSON object".to_string(),
            })?;

        let chance = object
            .get("chance")
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| PredictionError::MalformedResponse {
                provider: provider.to_string(),
                reason: "missing numeric 'chance'".to_string(),
            })?;

        let explanation = object
            .get("explanation")
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| PredictionError::MalformedResponse {
                provider: provider.to_string(),
                reason: "missing 'explanation'".to_string(),
            })?;

        Ok(Self {
            chance: chance.clamp(0.0, 100.0),
            explanation: explanation.to_string(),
            provider: provider.to_string(),
        })
    }

    /// Parses a reply that may surround the JSON object with other text.
    ///
    /// # Errors
    /// - `PredictionError::MalformedResponse` - No JSON object, or required fields missing
    pub fn from_embedded_json(text: &str, provider: &str) -> Result<Self, PredictionError> {
        let object = JSON_OBJECT_RE
            .find(text)
            .ok_or_else(|| PredictionError::MalformedResponse {
                provider: provider.to_string(),
                reason: "no JSON found in response".to_string(),
            })?;
        Self::from_json(object.as_str(), provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chance_is_clamped() {
        let high = Prediction::from_json(r#"{"chance": 150, "explanation": "Strong"}"#, "p").unwrap();
        assert_eq!(high.chance, 100.0);

        let low = Prediction::from_json(r#"{"chance": -3.5, "explanation": "Weak"}"#, "p").unwrap();
        assert_eq!(low.chance, 0.0);

        let mid = Prediction::from_json(r#"{"chance": 62.5, "explanation": "Fair"}"#, "p").unwrap();
        assert_eq!(mid.chance, 62.5);
        assert_eq!(mid.provider, "p");
    }

    #[test]
    fn test_required_fields() {
        for body in [
            r#"{"chance": "70", "explanation": "x"}"#,
            r#"{"explanation": "x"}"#,
            r#"{"chance": 70}"#,
            r#"{"chance": 70, "explanation": ""}"#,
            r#"{"chance": 70, "explanation": 5}"#,
            "Sure! Here is the JSON",
            "[70]",
        ] {
            let result = Prediction::from_json(body, "p");
            assert!(
                matches!(result, Err(PredictionError::MalformedResponse { .. })),
                "accepted {body}"
            );
        }
    }

    #[test]
    fn test_embedded_json_is_extracted() {
        let text = "Here is my analysis:\n```json\n{\"chance\": 80, \"explanation\": \"Good {fit}\"}\n```\nGood luck!";
        let prediction = Prediction::from_embedded_json(text, "gemini").unwrap();
        assert_eq!(prediction.chance, 80.0);
        assert_eq!(prediction.explanation, "Good {fit}");

        assert!(Prediction::from_embedded_json("no braces here", "gemini").is_err());
    }

    #[test]
    fn test_profile_wire_format() {
        let profile: AdmissionProfile = serde_json::from_value(serde_json::json!({
            "gpa": "3.8",
            "untScore": "120",
            "program": "Computer Science BSc"
        }))
        .unwrap();
        assert_eq!(profile.unt_score, "120");
        assert_eq!(profile.ielts, "");
        assert_eq!(profile.program.as_deref(), Some("Computer Science BSc"));
    }
}
