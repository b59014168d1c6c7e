//! Prompt construction and response parsing for the generative assessment.
//!
//! The parser owns the fence-stripping heuristic so a stricter
//! schema-validated parser can replace it without touching callers.

use super::{AnalysisError, RiskAssessment};

/// Builds the fixed instructional prompt with the user text interpolated
/// verbatim.
///
/// The text is not escaped or delimited beyond plain quotes, so adversarial
/// input can steer the generative model (prompt injection). Kept as-is to
/// match the deployed behavior; harden before real-world use.
pub fn build_prompt(text: &str) -> String {
    format!(
        r#"You are a mental health assessment AI assistant. Analyze the following text for suicide risk indicators.

Assess the text for:
1. Direct expressions of suicidal ideation
2. Hopelessness or helplessness
3. Social isolation or withdrawal
4. Severe emotional pain
5. Talk of being a burden
6. Recent losses or trauma
7. Substance abuse mentions
8. Planning or preparation indicators

Text to analyze:
"{text}"

Provide your response in JSON format with the following structure:
{{
    "risk_level": "low/moderate/high/severe",
    "confidence": "0-100",
    "indicators_found": ["list of specific indicators"],
    "reasoning": "brief explanation of assessment",
    "immediate_action_needed": true/false,
    "supportive_response": "compassionate message to the person"
}}

Be compassionate, non-judgmental, and err on the side of caution."#
    )
}

/// Strips an optional fenced-code wrapper from model output.
///
/// Rule, preserved exactly: if the text contains a "```json" marker, take
/// everything between it and the next "```"; otherwise if it contains a
/// generic "```", take everything between the first pair of markers; with no
/// closing marker, take the rest of the text. Assumes at most one fence
/// block.
fn strip_fences(raw: &str) -> &str {
    if let Some(start) = raw.find("```json") {
        let body = start + "```json".len();
        let end = raw[body..].find("```").map_or(raw.len(), |i| body + i);
        raw[body..end].trim()
    } else if let Some(start) = raw.find("```") {
        let body = start + "```".len();
        let end = raw[body..].find("```").map_or(raw.len(), |i| body + i);
        raw[body..end].trim()
    } else {
        raw.trim()
    }
}

/// Parses generative-model output into a [`RiskAssessment`].
///
/// # Errors
/// `AnalysisError::Parse` on malformed JSON or any missing required field,
/// with the offending raw text attached. The parser never invents missing
/// fields; degraded fallbacks are the caller's decision.
pub fn parse_response(raw: &str) -> Result<RiskAssessment, AnalysisError> {
    let body = strip_fences(raw);
    serde_json::from_str(body).map_err(|e| AnalysisError::Parse {
        detail: e.to_string(),
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskLevel;

    const BARE: &str = r#"{
        "risk_level": "low",
        "confidence": 88,
        "indicators_found": ["none"],
        "reasoning": "no indicators present",
        "immediate_action_needed": false,
        "supportive_response": "keep taking care of yourself"
    }"#;

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let prompt = build_prompt("I feel fine \"today\"");
        assert!(prompt.contains("\"I feel fine \"today\"\""));
        assert!(prompt.contains("risk_level"));
    }

    #[test]
    fn test_parses_bare_json() {
        let assessment = parse_response(BARE).unwrap();
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.confidence, 88.0);
        assert!(!assessment.immediate_action_needed);
    }

    #[test]
    fn test_strips_json_tagged_fence() {
        let fenced = format!("```json\n{}\n```", BARE);
        let a = parse_response(&fenced).unwrap();
        let b = parse_response(BARE).unwrap();
        assert_eq!(a.risk_level, b.risk_level);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.reasoning, b.reasoning);
    }

    #[test]
    fn test_strips_generic_fence() {
        let fenced = format!("```\n{}\n```", BARE);
        assert_eq!(parse_response(&fenced).unwrap().risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_fence_with_surrounding_prose() {
        let wrapped = format!("Here is my assessment:\n```json\n{}\n```\nStay safe.", BARE);
        assert_eq!(parse_response(&wrapped).unwrap().confidence, 88.0);
    }

    #[test]
    fn test_unclosed_fence_reads_to_end() {
        let open = format!("```json\n{}", BARE);
        assert_eq!(parse_response(&open).unwrap().risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_malformed_json_attaches_raw_text() {
        let err = parse_response("not json at all").unwrap_err();
        match err {
            AnalysisError::Parse { raw, .. } => assert_eq!(raw, "not json at all"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let partial = r#"{"risk_level": "high", "confidence": 70}"#;
        assert!(matches!(
            parse_response(partial),
            Err(AnalysisError::Parse { .. })
        ));
    }

    #[test]
    fn test_unknown_risk_level_is_parse_error() {
        let bad = BARE.replace("\"low\"", "\"catastrophic\"");
        assert!(matches!(
            parse_response(&bad),
            Err(AnalysisError::Parse { .. })
        ));
    }
}
