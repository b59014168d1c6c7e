//! Plaintext report rendering and write-once persistence of analyses.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::recommend::{recommendations_for, resources};
use super::AnalysisRecord;

const RULE: &str = "============================================================";

/// Renders a full textual report for one completed analysis: assessment,
/// indicators, recommendations, crisis resources and disclaimer.
pub fn render_report(record: &AnalysisRecord) -> String {
    let assessment = &record.assessment;
    let recommendations = recommendations_for(assessment.risk_level.as_str());
    let resources = resources();

    let mut report = String::new();
    let _ = writeln!(report, "{}", RULE);
    let _ = writeln!(report, "SUICIDE RISK ANALYSIS REPORT");
    let _ = writeln!(report, "{}", RULE);
    let _ = writeln!(report);
    let _ = writeln!(report, "Timestamp: {}", record.timestamp.to_rfc3339());
    let _ = writeln!(report);
    let _ = writeln!(report, "RISK ASSESSMENT:");
    let _ = writeln!(
        report,
        "- Risk Level: {}",
        assessment.risk_level.as_str().to_uppercase()
    );
    let _ = writeln!(report, "- Confidence: {}%", assessment.confidence);
    let _ = writeln!(report, "- Urgency: {}", recommendations.urgency);
    let _ = writeln!(report);
    let _ = writeln!(report, "INDICATORS FOUND:");
    for indicator in &assessment.indicators_found {
        let _ = writeln!(report, "  - {}", indicator);
    }
    let _ = writeln!(report);
    let _ = writeln!(report, "REASONING:");
    let _ = writeln!(report, "{}", assessment.reasoning);
    let _ = writeln!(report);
    let _ = writeln!(report, "SUPPORTIVE MESSAGE:");
    let _ = writeln!(report, "{}", assessment.supportive_response);
    let _ = writeln!(report);
    let _ = writeln!(report, "{}", RULE);
    let _ = writeln!(report, "RECOMMENDATIONS: {}", recommendations.action);
    let _ = writeln!(report, "{}", RULE);
    for step in &recommendations.steps {
        let _ = writeln!(report, "  {}", step);
    }
    let _ = writeln!(report);
    let _ = writeln!(report, "{}", RULE);
    let _ = writeln!(report, "CRISIS RESOURCES:");
    let _ = writeln!(report, "{}", RULE);
    for (location, contact) in &resources.emergency {
        let _ = writeln!(report, "  {}: {}", location, contact);
    }
    let _ = writeln!(report);
    let _ = writeln!(report, "Additional Resources:");
    for website in &resources.websites {
        let _ = writeln!(report, "  - {}", website);
    }
    let _ = writeln!(report);
    let _ = writeln!(report, "{}", RULE);
    let _ = writeln!(report, "IMPORTANT DISCLAIMER:");
    let _ = writeln!(
        report,
        "This is an AI-assisted assessment tool and does not replace\n\
         professional mental health evaluation. Always consult with\n\
         qualified mental health professionals for proper diagnosis\n\
         and treatment."
    );
    let _ = writeln!(report, "{}", RULE);
    report
}

/// Persists one analysis as a pretty-printed, timestamp-named JSON file.
///
/// Creates `dir` if needed and returns the written path. Files are
/// write-once and never read back by this system.
pub fn save_analysis(dir: &Path, record: &AnalysisRecord) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let filename = format!(
        "risk_analysis_{}.json",
        record.timestamp.format("%Y%m%d_%H%M%S")
    );
    let path = dir.join(filename);
    let file = fs::File::create(&path)?;
    serde_json::to_writer_pretty(file, record)?;
    log::info!("Analysis saved to {:?}", path);
    Ok(path)
}
