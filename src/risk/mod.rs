//! Risk-assessment pipeline backed by a hosted generative model.
//!
//! Independent of the classification pipeline: user text is embedded in a
//! fixed instructional prompt, sent to the generative endpoint, and the
//! JSON-shaped reply is parsed into a [`RiskAssessment`]. A static
//! recommendation table maps the assessed level to suggested actions.

mod client;
mod prompt;
mod recommend;
mod report;

pub use client::{RiskAnalyzer, API_KEY_ENV, DEFAULT_MODEL};
pub use prompt::{build_prompt, parse_response};
pub use recommend::{recommendations_for, resources, CrisisResources, RecommendationBundle};
pub use report::{render_report, save_analysis};

use chrono::{DateTime, Local};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Errors from the risk-assessment pipeline.
///
/// Terminal for the current request; nothing is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// No API key was configured; the external call is never attempted.
    #[error("{API_KEY_ENV} environment variable is not set")]
    MissingCredential,
    /// The HTTP request to the generative service failed.
    #[error("Request to generative service failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The service answered without any candidate text.
    #[error("Generative service returned no candidate text")]
    EmptyResponse,
    /// The candidate text could not be parsed as a risk assessment.
    ///
    /// Carries the offending raw text for diagnostics; the caller decides
    /// whether to surface a degraded "unknown" result to the end user.
    #[error("Failed to parse analysis response: {detail}; raw response: {raw:?}")]
    Parse { detail: String, raw: String },
}

/// Ordered severity categories used by the risk pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Severe => "severe",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed risk assessment, immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Confidence in percent, 0-100. The prompt template shows this field as
    /// a string, and live responses return either form, so both are accepted.
    #[serde(deserialize_with = "confidence_from_number_or_string")]
    pub confidence: f32,
    pub indicators_found: Vec<String>,
    pub reasoning: String,
    pub immediate_action_needed: bool,
    pub supportive_response: String,
}

/// One completed analysis: the assessment plus request bookkeeping, as
/// persisted to disk by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(flatten)]
    pub assessment: RiskAssessment,
    pub timestamp: DateTime<Local>,
    pub original_text: String,
}

fn confidence_from_number_or_string<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(|f| f as f32)
            .ok_or_else(|| D::Error::custom("confidence is not a finite number")),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f32>()
            .map_err(|_| D::Error::custom(format!("confidence is not numeric: {:?}", s))),
        _ => Err(D::Error::custom(
            "confidence must be a number or a numeric string",
        )),
    }
}
