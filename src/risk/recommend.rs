//! Static recommendation and crisis-resource tables.
//!
//! Read-only reference data, defined at process start and safe for
//! unsynchronized concurrent reads.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::BTreeMap;

/// Suggested actions for one risk level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationBundle {
    /// One-line action summary.
    pub action: &'static str,
    /// Ordered list of suggested steps.
    pub steps: Vec<&'static str>,
    /// Urgency label.
    pub urgency: &'static str,
}

/// Crisis contact points shown alongside every assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrisisResources {
    pub emergency: BTreeMap<&'static str, &'static str>,
    pub websites: Vec<&'static str>,
}

lazy_static! {
    static ref RECOMMENDATIONS: BTreeMap<&'static str, RecommendationBundle> = {
        let mut table = BTreeMap::new();
        table.insert(
            "severe",
            RecommendationBundle {
                action: "IMMEDIATE PROFESSIONAL HELP REQUIRED",
                steps: vec![
                    "Call 988 (Suicide & Crisis Lifeline) immediately",
                    "Go to nearest emergency room",
                    "Call 911 if in immediate danger",
                    "Do not leave the person alone",
                ],
                urgency: "CRITICAL",
            },
        );
        table.insert(
            "high",
            RecommendationBundle {
                action: "Urgent professional support needed",
                steps: vec![
                    "Contact a mental health professional today",
                    "Call 988 or crisis hotline for immediate support",
                    "Reach out to trusted friend or family member",
                    "Create a safety plan with professional help",
                ],
                urgency: "HIGH",
            },
        );
        table.insert(
            "moderate",
            RecommendationBundle {
                action: "Professional consultation recommended",
                steps: vec![
                    "Schedule appointment with therapist or counselor",
                    "Talk to someone you trust about how you're feeling",
                    "Call crisis hotline if feelings intensify",
                    "Practice self-care and avoid isolation",
                ],
                urgency: "MODERATE",
            },
        );
        table.insert(
            "low",
            RecommendationBundle {
                action: "Supportive resources available",
                steps: vec![
                    "Consider talking to a counselor or therapist",
                    "Maintain social connections",
                    "Practice mental health wellness activities",
                    "Know that help is available if needed",
                ],
                urgency: "LOW",
            },
        );
        table
    };
    static ref RESOURCES: CrisisResources = CrisisResources {
        emergency: [
            ("US", "988 (Suicide & Crisis Lifeline)"),
            ("International", "https://findahelpline.com"),
            ("Text", "Text HOME to 741741 (Crisis Text Line)"),
        ]
        .into_iter()
        .collect(),
        websites: vec![
            "https://suicidepreventionlifeline.org",
            "https://www.opencounseling.com/suicide-hotlines",
        ],
    };
}

/// Looks up the recommendation bundle for a risk level.
///
/// Any level outside the fixed table falls back to the "moderate" bundle.
/// This is an explicit policy, not an error: downstream behavior depends on
/// unknown levels degrading to moderate guidance.
pub fn recommendations_for(level: &str) -> &'static RecommendationBundle {
    let wanted = level.trim().to_ascii_lowercase();
    RECOMMENDATIONS
        .get(wanted.as_str())
        .unwrap_or_else(|| &RECOMMENDATIONS["moderate"])
}

/// Static crisis-resource table.
pub fn resources() -> &'static CrisisResources {
    &RESOURCES
}
