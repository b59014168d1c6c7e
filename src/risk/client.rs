//! HTTP client for the hosted generative model.

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::prompt::{build_prompt, parse_response};
use super::{AnalysisError, AnalysisRecord};

/// Environment variable holding the generative-service API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Default generative model identifier.
pub const DEFAULT_MODEL: &str = "gemini-pro";

const ENDPOINT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// Request/response shapes for the generateContent API. Only the fields this
// client reads are modeled.

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Analyzes text for suicide-risk indicators via the generative service.
///
/// One blocking request per analysis: no retry, no internal timeout, no
/// cancellation path. A caller-level timeout wrapper is an external
/// collaborator's responsibility.
#[derive(Debug, Clone)]
pub struct RiskAnalyzer {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl RiskAnalyzer {
    /// Creates an analyzer with an explicit API key.
    ///
    /// An empty key is treated the same as an absent one.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AnalysisError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AnalysisError::MissingCredential);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Creates an analyzer from the [`API_KEY_ENV`] environment variable.
    pub fn from_env() -> Result<Self, AnalysisError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) => Self::new(key),
            Err(_) => Err(AnalysisError::MissingCredential),
        }
    }

    /// Overrides the generative model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Runs one risk analysis round trip.
    ///
    /// Builds the prompt, calls the generative endpoint, strips any fence
    /// wrapper from the reply and parses it into an [`AnalysisRecord`]
    /// stamped with the local time and the original text.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisRecord, AnalysisError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(text),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.3,
                max_output_tokens: 1000,
            },
        };
        let url = format!(
            "{}/{}:generateContent?key={}",
            ENDPOINT_BASE, self.model, self.api_key
        );

        log::info!("Requesting risk assessment from model '{}'", self.model);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body: GenerateResponse = response.json().await?;

        let reply = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(AnalysisError::EmptyResponse)?;
        log::debug!("Received {} bytes of candidate text", reply.len());

        let assessment = parse_response(&reply)?;
        log::info!(
            "Assessment complete: level={} confidence={}",
            assessment.risk_level,
            assessment.confidence
        );

        Ok(AnalysisRecord {
            assessment,
            timestamp: Local::now(),
            original_text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_missing_credential() {
        assert!(matches!(
            RiskAnalyzer::new(""),
            Err(AnalysisError::MissingCredential)
        ));
        assert!(matches!(
            RiskAnalyzer::new("   "),
            Err(AnalysisError::MissingCredential)
        ));
    }

    #[test]
    fn test_from_env_without_key() {
        std::env::remove_var(API_KEY_ENV);
        assert!(matches!(
            RiskAnalyzer::from_env(),
            Err(AnalysisError::MissingCredential)
        ));
    }

    #[test]
    fn test_with_model_override() {
        let analyzer = RiskAnalyzer::new("test-key").unwrap().with_model("gemini-1.5-pro");
        assert_eq!(analyzer.model, "gemini-1.5-pro");
    }
}
